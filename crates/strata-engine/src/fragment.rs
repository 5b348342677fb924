//! A fragment: one markup-anchored parallax entity.
//!
//! The fragment owns a [`Drawable`], a handle to its source anchor, and the
//! position-from-scroll computation. Its lifecycle is a small state machine:
//!
//! ```text
//! Unloaded → Loading → Ready
//!     ↑         │
//!     └─────────┘  reload()
//! Unloaded → Discarded  (unload(), terminal)
//! ```
//!
//! A failed rasterization leaves the fragment in `Loading` with no image —
//! perpetually invisible, never an error — until an explicit `reload()`.

use serde::{Deserialize, Serialize};
use strata_common::warning::warn_once;
use strata_geom::{Bounds, Point, Rect, parallax_offset};
use strata_raster::{RasterImage, Surface};

use crate::drawable::Drawable;
use crate::entity::{Entity, LoadOutcome};
use crate::host::{Anchor, RasterRequest, RasterTicket, Rasterizer};

/// Lifecycle state of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No rasterization requested yet.
    Unloaded,
    /// Rasterization requested (or failed; a failure stays here).
    Loading,
    /// Raster image installed and drawable.
    Ready,
    /// Unloaded for good; the drawable is released and the anchor detached.
    Discarded,
}

/// Per-fragment option overrides applied uniformly at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FragmentOptions {
    /// Lock the horizontal correction axis.
    pub h_lock: bool,
    /// Lock the vertical correction axis.
    pub v_lock: bool,
    /// Override the anchor-provided depth speed.
    pub velocity: Option<f32>,
}

/// One parallax-participating entity built from a markup anchor.
pub struct Fragment {
    /// Source anchor; `None` once discarded.
    anchor: Option<Box<dyn Anchor>>,
    /// Anchor frame captured by the last invalidate/sync.
    frame: Rect,
    /// Depth speed in `0..=1`.
    velocity: f32,
    /// Construction-time velocity override; survives invalidation.
    velocity_override: Option<f32>,
    /// Draw-order key.
    z: i32,
    /// Horizontal lock flag.
    h_lock: bool,
    /// Vertical lock flag.
    v_lock: bool,
    /// Resting horizontal displacement from the viewport center, captured at
    /// load time and recomputed by `sync`.
    dx: f32,
    /// Resting vertical displacement.
    dy: f32,
    /// Bounds installed by the last resize.
    bounds: Bounds,
    /// The owned drawable.
    drawable: Drawable,
    /// Lifecycle state.
    state: LoadState,
    /// Ticket of the in-flight rasterization, if any.
    pending: Option<RasterTicket>,
}

impl Fragment {
    /// Build a fragment from a discovered anchor, applying `options`.
    #[must_use]
    pub fn from_anchor(anchor: Box<dyn Anchor>, options: &FragmentOptions) -> Self {
        let frame = anchor.frame();
        let velocity = options.velocity.unwrap_or_else(|| anchor.velocity());
        let z = anchor.z();
        Self {
            anchor: Some(anchor),
            frame,
            velocity,
            velocity_override: options.velocity,
            z,
            h_lock: options.h_lock,
            v_lock: options.v_lock,
            dx: 0.0,
            dy: 0.0,
            bounds: Bounds::default(),
            drawable: Drawable::new(z),
            state: LoadState::Unloaded,
            pending: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.state
    }

    /// The owned drawable.
    #[must_use]
    pub const fn drawable(&self) -> &Drawable {
        &self.drawable
    }

    /// Resting displacement from the viewport center.
    #[must_use]
    pub const fn displacement(&self) -> (f32, f32) {
        (self.dx, self.dy)
    }

    /// Unload for good: release the raster image and detach from the anchor.
    ///
    /// Terminal. An in-flight rasterization that resolves afterwards is
    /// discarded harmlessly.
    pub fn unload(&mut self) {
        self.drawable.clear_image();
        self.anchor = None;
        self.state = LoadState::Discarded;
    }

    /// Submit a rasterization request for the current anchor markup.
    fn request(&mut self, rasterizer: &mut dyn Rasterizer) -> LoadOutcome {
        let Some(anchor) = &self.anchor else {
            return LoadOutcome::Ready;
        };
        let ticket = rasterizer.rasterize(RasterRequest {
            markup: anchor.markup(),
            style_text: anchor.style_text(),
            width: self.frame.width,
            height: self.frame.height,
        });
        self.pending = Some(ticket);
        self.state = LoadState::Loading;
        LoadOutcome::Pending(ticket)
    }
}

impl Entity for Fragment {
    fn z(&self) -> i32 {
        self.z
    }

    fn load(&mut self, rasterizer: &mut dyn Rasterizer) -> LoadOutcome {
        if let Some(ticket) = self.pending {
            return LoadOutcome::Pending(ticket);
        }
        self.request(rasterizer)
    }

    fn reload(&mut self, rasterizer: &mut dyn Rasterizer) -> LoadOutcome {
        // Never two loads in flight for the same fragment.
        if let Some(ticket) = self.pending {
            return LoadOutcome::Pending(ticket);
        }
        if self.state == LoadState::Discarded {
            return LoadOutcome::Ready;
        }
        self.state = LoadState::Unloaded;
        self.request(rasterizer)
    }

    fn pending_ticket(&self) -> Option<RasterTicket> {
        self.pending
    }

    fn finish_load(&mut self, image: Option<RasterImage>, viewport_center: Point) {
        if self.state == LoadState::Discarded {
            // Resolved after unload(); drop the result harmlessly.
            self.pending = None;
            return;
        }
        self.pending = None;
        match image {
            Some(image) => {
                self.drawable.set_image(image);
                let center = self.frame.center();
                self.dx = center.x - viewport_center.x;
                self.dy = center.y - viewport_center.y;
                self.state = LoadState::Ready;
            }
            None => {
                warn_once(
                    "raster",
                    &format!(
                        "rasterization failed for fragment at ({}, {}); \
                         leaving it invisible until reload",
                        self.frame.left, self.frame.top
                    ),
                );
                self.drawable.clear_image();
                self.state = LoadState::Loading;
            }
        }
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn invalidate(&mut self) {
        if let Some(anchor) = &self.anchor {
            self.frame = anchor.frame();
            self.velocity = self
                .velocity_override
                .unwrap_or_else(|| anchor.velocity());
            self.z = anchor.z();
            self.drawable.set_z_order(self.z);
        }
    }

    fn sync(&mut self, bounds: Bounds) {
        if let Some(anchor) = &self.anchor {
            self.frame = anchor.frame();
        }
        let center = bounds.center();
        let frame_center = self.frame.center();
        self.dx = frame_center.x - center.x;
        self.dy = frame_center.y - center.y;
        self.bounds = bounds;
        // Re-layout: the placement keeps its position but tracks the frame
        // extent until the next move.
        let placement = self.drawable.placement();
        self.drawable.set_placement(Rect::new(
            placement.left,
            placement.top,
            self.frame.width.round(),
            self.frame.height.round(),
        ));
    }

    fn move_to(&mut self, scroll: Point) {
        let position = parallax_offset(
            &self.frame,
            scroll,
            self.dx,
            self.dy,
            self.velocity,
            self.h_lock,
            self.v_lock,
        );
        let placement = Rect::new(
            position.x.round(),
            position.y.round(),
            self.frame.width.round(),
            self.frame.height.round(),
        );
        self.drawable.set_placement(placement);
        // Visibility culling: skip drawables fully outside the bounds.
        self.drawable
            .set_visible(placement.intersects(&self.bounds.to_rect()));
    }

    fn draw(&mut self, surface: &mut Surface, _scroll: Point) {
        self.drawable.draw(surface);
    }

    fn hits(&self, x: f32, y: f32) -> bool {
        self.state == LoadState::Ready && self.drawable.placement().contains(x, y)
    }

    fn set_pressed(&mut self, pressed: bool) {
        self.drawable
            .set_opacity(if pressed { 0.9 } else { 1.0 });
    }
}
