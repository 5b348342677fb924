//! Depth-to-offset math for the parallax draw pipeline.
//!
//! Two pieces live here:
//!
//! 1. [`parallax_offset`] — where an entity's rectangle lands on the surface
//!    for a given scroll vector and depth speed.
//! 2. [`factor`] — a bounded influence value in `[-1, +1]` derived from a
//!    position inside a bounds region, used by the radial light layer to
//!    "breathe" its glow as the page scrolls.

use crate::rect::{Bounds, Point, Rect};

/// Linearly rate `value` between `min` and `max` (0 at `min`, 1 at `max`).
///
/// A degenerate range (`max == min`) yields NaN; callers that need a total
/// function go through [`factor`], which maps that case to 0.
#[must_use]
pub fn rate(min: f32, max: f32, value: f32) -> f32 {
    (value - min) / (max - min)
}

/// Signed influence of a surface position within `bounds`, in `[-1, +1]`.
///
/// Exactly one lock flag selects the rated axis: with `v_lock` the horizontal
/// position is rated across `[min_x, max_x]`, with `h_lock` the vertical
/// position across `[min_y, max_y]`, then scaled to `rate * 2 - 1`. If both
/// or neither flag is set the result is 0.
///
/// Degenerate bounds (`max == min` on the rated axis) return 0, never NaN.
#[must_use]
pub fn factor(x: f32, y: f32, bounds: &Bounds, h_lock: bool, v_lock: bool) -> f32 {
    let raw = match (h_lock, v_lock) {
        (false, true) => rate(bounds.min_x, bounds.max_x, x) * 2.0 - 1.0,
        (true, false) => rate(bounds.min_y, bounds.max_y, y) * 2.0 - 1.0,
        _ => 0.0,
    };
    if raw.is_nan() { 0.0 } else { raw }
}

/// Draw position for `frame` under the given scroll vector.
///
/// `velocity` is the depth speed in `0..=1`: at 1 the scroll term tracks the
/// viewport exactly (foreground, no parallax); at 0 the scroll term vanishes
/// and the `-dx`/`-dy` correction re-centers the entity in the viewport
/// permanently (a fixed layer). `dx`/`dy` are the entity's resting offset
/// from the viewport center, captured once at load time. A lock flag zeroes
/// the correction on its axis.
#[must_use]
pub fn parallax_offset(
    frame: &Rect,
    scroll: Point,
    dx: f32,
    dy: f32,
    velocity: f32,
    h_lock: bool,
    v_lock: bool,
) -> Point {
    let dx = if h_lock { 0.0 } else { dx * (1.0 - velocity) };
    let dy = if v_lock { 0.0 } else { dy * (1.0 - velocity) };
    Point::new(
        frame.left - scroll.x * velocity - dx,
        frame.top - scroll.y * velocity - dy,
    )
}
