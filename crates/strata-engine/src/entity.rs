//! The trait every screen-owned entity implements.
//!
//! Two kinds of entity exist: markup [`Fragment`](crate::fragment::Fragment)s
//! whose imagery comes from the host rasterizer, and procedural
//! [layers](crate::layer) that generate their own. The screen drives both
//! through this one seam.

use strata_geom::{Bounds, Point};
use strata_raster::{RasterImage, Surface};

use crate::host::{RasterTicket, Rasterizer};

/// Result of asking an entity to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The entity is immediately ready (procedural layers, discarded
    /// fragments).
    Ready,
    /// A rasterization request is in flight under this ticket.
    Pending(RasterTicket),
}

/// A parallax-participating entity owned by the screen.
pub trait Entity {
    /// Draw-order key; the screen sorts ascending so larger values draw on
    /// top.
    fn z(&self) -> i32;

    /// Begin loading. Entities with nothing to rasterize return
    /// [`LoadOutcome::Ready`] at once; fragments submit a request and return
    /// its ticket. Calling while a request is already in flight returns the
    /// existing ticket without submitting another.
    fn load(&mut self, rasterizer: &mut dyn Rasterizer) -> LoadOutcome;

    /// Drop back to unloaded and replay the load. Guarded: a reload while a
    /// prior load is still in flight is a no-op returning the pending
    /// ticket.
    fn reload(&mut self, rasterizer: &mut dyn Rasterizer) -> LoadOutcome;

    /// Ticket of the in-flight rasterization, if any.
    fn pending_ticket(&self) -> Option<RasterTicket>;

    /// Deliver a rasterization outcome (`None` = failure). `viewport_center`
    /// is the surface center at completion time, used to capture the resting
    /// parallax displacement.
    fn finish_load(&mut self, image: Option<RasterImage>, viewport_center: Point);

    /// Install new bounds (set exactly once per resize). Layers regenerate
    /// their procedural payload here.
    fn set_bounds(&mut self, bounds: Bounds);

    /// Re-read the anchor's current geometry without re-rasterizing.
    fn invalidate(&mut self);

    /// Recompute the resting displacement against new bounds and re-layout
    /// the drawable; called once per resize after the bounds change.
    fn sync(&mut self, bounds: Bounds);

    /// Compute the scroll-relative placement and write it into the drawable;
    /// does not draw.
    fn move_to(&mut self, scroll: Point);

    /// Draw onto the surface. Fragments blit their already-placed drawable;
    /// layers render procedurally against the scroll offset.
    fn draw(&mut self, surface: &mut Surface, scroll: Point);

    /// Whether the surface position hits this entity.
    fn hits(&self, _x: f32, _y: f32) -> bool {
        false
    }

    /// Pointer press feedback (fragments dim their drawable while pressed).
    fn set_pressed(&mut self, _pressed: bool) {}
}
