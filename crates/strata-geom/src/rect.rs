//! Axis-aligned rectangles and the bounds regions derived from them.
//!
//! A [`Rect`] is positioned by its top-left corner and is immutable by
//! convention: components build a new rectangle instead of mutating one in
//! place. A [`Bounds`] is the min/max form of the same region, used by the
//! procedural layers and the influence-factor math.

use serde::{Deserialize, Serialize};

/// A point (or offset) in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle positioned by its top-left corner.
///
/// Width and height may be zero (a degenerate rectangle is valid) but are
/// never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub left: f32,
    /// Vertical position of the top-left corner.
    pub top: f32,
    /// Width of the rectangle (never negative).
    pub width: f32,
    /// Height of the rectangle (never negative).
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and extent.
    ///
    /// Negative extents are clamped to zero so the never-negative invariant
    /// holds even for degenerate host geometry.
    #[must_use]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// The zero rectangle at the origin.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Right edge (`left + width`).
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right()) / 2.0,
            (self.top + self.bottom()) / 2.0,
        )
    }

    /// Whether the point lies inside the rectangle (edges inclusive on the
    /// top/left, exclusive on the bottom/right).
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Whether this rectangle overlaps `other` (open intersection: touching
    /// edges do not count).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

/// A region expressed as axis minima and maxima.
///
/// This is the form the layers and the influence-factor math work in. It is
/// recomputed once per resize and handed to every owned entity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum x value.
    pub min_x: f32,
    /// Minimum y value.
    pub min_y: f32,
    /// Maximum x value.
    pub max_x: f32,
    /// Maximum y value.
    pub max_y: f32,
}

impl Bounds {
    /// Create a bounds region from its extrema.
    #[must_use]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The bounds covering a rectangle.
    #[must_use]
    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(rect.left, rect.top, rect.right(), rect.bottom())
    }

    /// Horizontal span (`max_x - min_x`).
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Vertical span (`max_y - min_y`).
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Area of the region.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Center point of the region.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// The region as a rectangle.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.width(), self.height())
    }
}
