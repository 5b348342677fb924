//! The drawable: a rasterized image plus its placement on the surface.
//!
//! A drawable is owned by exactly one fragment and knows nothing about
//! scrolling; the fragment computes placements, the drawable only blits.

use strata_geom::Rect;
use strata_raster::{RasterImage, Surface};

/// An opaque rasterized image with a placement rectangle.
///
/// `image` is `None` until the asynchronous rasterization completes; a
/// missing image means "do not draw".
pub struct Drawable {
    /// Raster handle, present once rasterization has completed.
    image: Option<RasterImage>,
    /// Where on the surface the image is blitted.
    placement: Rect,
    /// Blit opacity in `0..=1`.
    opacity: f32,
    /// Whether the drawable participates in drawing at all (visibility
    /// culling flips this).
    visible: bool,
    /// Draw-order key mirrored from the owning fragment.
    z_order: i32,
}

impl Drawable {
    /// Create an empty drawable (no image yet, zero placement).
    #[must_use]
    pub const fn new(z_order: i32) -> Self {
        Self {
            image: None,
            placement: Rect::zero(),
            opacity: 1.0,
            visible: true,
            z_order,
        }
    }

    /// Install the rasterized image.
    pub fn set_image(&mut self, image: RasterImage) {
        self.image = Some(image);
    }

    /// Drop the rasterized image (failed rasterization or unload).
    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Whether a raster handle is present.
    #[must_use]
    pub const fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Current placement rectangle.
    #[must_use]
    pub const fn placement(&self) -> Rect {
        self.placement
    }

    /// Move/resize the drawable on the surface.
    pub const fn set_placement(&mut self, placement: Rect) {
        self.placement = placement;
    }

    /// Blit opacity in `0..=1`.
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the blit opacity (clamped to `0..=1`).
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Whether the drawable is currently visible.
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Toggle visibility (used by the fragment's culling pass).
    pub const fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Draw-order key.
    #[must_use]
    pub const fn z_order(&self) -> i32 {
        self.z_order
    }

    /// Update the draw-order key.
    pub const fn set_z_order(&mut self, z_order: i32) {
        self.z_order = z_order;
    }

    /// Blit the image at the current placement.
    ///
    /// A missing image, a hidden drawable, or a placement with non-positive
    /// extent is a defined no-op, not an error.
    pub fn draw(&self, surface: &mut Surface) {
        if !self.visible {
            return;
        }
        let Some(image) = &self.image else {
            return;
        };
        if self.placement.width <= 0.0 || self.placement.height <= 0.0 {
            return;
        }
        surface.blit(image, &self.placement, self.opacity);
    }
}
