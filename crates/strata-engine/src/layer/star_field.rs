//! The star field layer: a night sky that wraps around the bounds.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strata_geom::{Bounds, Point};
use strata_raster::{RasterImage, Rgba, Surface};

use crate::entity::{Entity, LoadOutcome};
use crate::host::{RasterTicket, Rasterizer};

/// Bounds area covered by one star, on average.
const AREA_PER_STAR: f32 = 400.0;

/// Star saturation: low, for the washed-out "night" palette.
const STAR_SATURATION: f32 = 10.0;

/// Star value: high, stars are near-white.
const STAR_VALUE: f32 = 100.0;

/// Star alpha fraction.
const STAR_ALPHA: f32 = 0.8;

/// Options for [`StarFieldLayer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarFieldOptions {
    /// Draw-order key (behind all fragments by default).
    pub z: i32,
    /// Horizontal lock flag.
    pub h_lock: bool,
    /// Vertical lock flag.
    pub v_lock: bool,
}

impl Default for StarFieldOptions {
    fn default() -> Self {
        Self {
            z: -10,
            h_lock: false,
            v_lock: false,
        }
    }
}

/// One star: a translucent filled circle whose radius doubles as its depth
/// speed, so closer (larger) stars move faster.
#[derive(Debug, Clone, Copy)]
pub struct Star {
    /// Resting position inside the bounds.
    base: Point,
    /// Current surface position.
    position: Point,
    /// Circle radius, uniform in `[0, 1)`.
    radius: f32,
    /// Depth speed (equal to the radius).
    speed: f32,
    /// Star color.
    color: Rgba,
}

impl Star {
    /// Create a star with explicit properties.
    #[must_use]
    pub const fn new(base: Point, radius: f32, speed: f32, color: Rgba) -> Self {
        Self {
            base,
            position: base,
            radius,
            speed,
            color,
        }
    }

    /// Create a random star inside `bounds`.
    fn random(rng: &mut impl Rng, bounds: &Bounds) -> Self {
        let radius = rng.random::<f32>();
        let hue = rng.random_range(0.0..360.0);
        Self::new(
            Point::new(
                rng.random_range(bounds.min_x..bounds.max_x),
                rng.random_range(bounds.min_y..bounds.max_y),
            ),
            radius,
            radius,
            Rgba::from_hsv(hue, STAR_SATURATION, STAR_VALUE).with_alpha(STAR_ALPHA),
        )
    }

    /// Current surface position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Move by a speed-scaled delta, wrapping toroidally within `bounds`.
    ///
    /// Each axis wraps independently: the modulo keeps the coordinate below
    /// the maximum, and a negative result is wrapped forward by the bounds
    /// span, so `min <= coord < max` holds for any finite delta.
    pub fn advance(&mut self, dx: f32, dy: f32, bounds: &Bounds) {
        let mut x = dx.mul_add(self.speed, self.base.x) % bounds.max_x;
        let mut y = dy.mul_add(self.speed, self.base.y) % bounds.max_y;
        if x < bounds.min_x {
            x += bounds.width();
        }
        if y < bounds.min_y {
            y += bounds.height();
        }
        self.position = Point::new(x, y);
    }

    /// Draw the star as a filled circle.
    fn draw(&self, surface: &mut Surface) {
        surface.fill_circle(self.position, self.radius, self.color);
    }
}

/// Procedural star-field layer.
pub struct StarFieldLayer {
    /// Explicit layer region, recomputed on every resize.
    bounds: Bounds,
    /// Draw-order key.
    z: i32,
    /// Horizontal lock flag (unused by the stars themselves but kept so the
    /// layer participates in the shared option surface).
    h_lock: bool,
    /// Vertical lock flag.
    v_lock: bool,
    /// Current stars, regenerated whenever the bounds change.
    stars: Vec<Star>,
    /// Generator for star positions and palettes.
    rng: rand::rngs::ThreadRng,
}

impl StarFieldLayer {
    /// Create a star-field layer. Stars are generated lazily once bounds
    /// arrive.
    #[must_use]
    pub fn new(options: StarFieldOptions) -> Self {
        Self {
            bounds: Bounds::default(),
            z: options.z,
            h_lock: options.h_lock,
            v_lock: options.v_lock,
            stars: Vec::new(),
            rng: rand::rng(),
        }
    }

    /// Number of stars for a bounds region (`area / 400`, truncated).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn star_count_for(bounds: &Bounds) -> usize {
        (bounds.area() / AREA_PER_STAR).max(0.0) as usize
    }

    /// The current stars.
    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Lock flags (shared with the option surface of the other layers).
    #[must_use]
    pub const fn locks(&self) -> (bool, bool) {
        (self.h_lock, self.v_lock)
    }

    /// Regenerate the star payload for the current bounds.
    fn regenerate(&mut self) {
        let count = Self::star_count_for(&self.bounds);
        self.stars = (0..count)
            .map(|_| Star::random(&mut self.rng, &self.bounds))
            .collect();
    }
}

impl Entity for StarFieldLayer {
    fn z(&self) -> i32 {
        self.z
    }

    fn load(&mut self, _rasterizer: &mut dyn Rasterizer) -> LoadOutcome {
        LoadOutcome::Ready
    }

    fn reload(&mut self, _rasterizer: &mut dyn Rasterizer) -> LoadOutcome {
        self.regenerate();
        LoadOutcome::Ready
    }

    fn pending_ticket(&self) -> Option<RasterTicket> {
        None
    }

    fn finish_load(&mut self, _image: Option<RasterImage>, _viewport_center: Point) {}

    fn set_bounds(&mut self, bounds: Bounds) {
        if bounds != self.bounds {
            self.bounds = bounds;
            self.regenerate();
        }
    }

    fn invalidate(&mut self) {}

    fn sync(&mut self, bounds: Bounds) {
        self.set_bounds(bounds);
    }

    fn move_to(&mut self, _scroll: Point) {}

    fn draw(&mut self, surface: &mut Surface, scroll: Point) {
        let bounds = self.bounds;
        for star in &mut self.stars {
            star.advance(-scroll.x, -scroll.y, &bounds);
            star.draw(surface);
        }
    }
}
