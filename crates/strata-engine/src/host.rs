//! Interfaces the compositor consumes from its host environment.
//!
//! The core never scans markup, captures computed style, rasterizes
//! anything, or listens for events itself; the host supplies all of that
//! behind the traits here:
//!
//! 1. **Discovery** — which page elements participate, as [`Anchor`] handles.
//! 2. **Rasterization** — [`Rasterizer`] turns a markup fragment plus its
//!    captured style into a raster image, asynchronously: `rasterize`
//!    returns a [`RasterTicket`] immediately and the host later delivers the
//!    outcome through `Engine::finish_raster`.
//! 3. **Viewport** — scroll offset, visible size, and device pixel ratio.

use strata_geom::{Point, Rect};

/// A handle to one parallax-participating page element.
///
/// The compositor re-reads the handle's geometry on every invalidation, so
/// implementations should reflect the element's *current* layout.
pub trait Anchor {
    /// Current page-space frame of the element.
    fn frame(&self) -> Rect;

    /// Depth speed in `0..=1` (1 = foreground, no parallax; 0 = fixed to
    /// the viewport).
    fn velocity(&self) -> f32 {
        1.0
    }

    /// Draw-order key; larger values draw on top.
    fn z(&self) -> i32 {
        1
    }

    /// Markup fragment to rasterize (the element's inner content).
    fn markup(&self) -> String;

    /// Captured computed style of the element, as a CSS-like declaration
    /// string filtered by the host to layout/typography/color properties.
    fn style_text(&self) -> String;
}

/// Discovers the candidate elements inside the root region.
pub trait Discovery {
    /// Frame of the root region, or `None` if the configured root does not
    /// exist (a fatal configuration error at start-up).
    fn root_frame(&self) -> Option<Rect>;

    /// All candidate anchors inside the root region, in document order.
    fn find_candidates(&mut self) -> Vec<Box<dyn Anchor>>;
}

/// One rasterization request: a markup fragment plus captured style, to be
/// rendered at the given size.
#[derive(Debug, Clone)]
pub struct RasterRequest {
    /// Markup fragment to render.
    pub markup: String,
    /// Captured style declarations for the fragment.
    pub style_text: String,
    /// Render width.
    pub width: f32,
    /// Render height.
    pub height: f32,
}

/// Identifies one in-flight rasterization request.
///
/// There is no cancel path: a ticket that resolves after its fragment was
/// discarded is dropped harmlessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterTicket(u64);

impl RasterTicket {
    /// Wrap a raw ticket number.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw ticket number.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Asynchronous markup-to-image rasterization service.
pub trait Rasterizer {
    /// Begin rasterizing `request` and return a ticket for it.
    ///
    /// The host delivers the outcome later by calling
    /// `Engine::finish_raster(ticket, result)`; a `None` result signals
    /// failure and leaves the requesting entity invisible until an explicit
    /// reload.
    fn rasterize(&mut self, request: RasterRequest) -> RasterTicket;
}

/// Scroll, size, and pixel-density source for the running instance.
pub trait Viewport {
    /// Current scroll offset of the host page.
    fn scroll_offset(&self) -> Point;

    /// Current visible size of the region the surface should cover.
    fn visible_size(&self) -> (f32, f32);

    /// Device pixel ratio (backing pixels per layout unit).
    fn pixel_ratio(&self) -> f32 {
        1.0
    }
}
