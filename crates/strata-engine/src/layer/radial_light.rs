//! The radial light layer: a scroll-modulated glow behind everything else.

use serde::{Deserialize, Serialize};
use strata_geom::{Bounds, Point, factor};
use strata_raster::{RasterImage, Rgba, Surface};

use crate::entity::{Entity, LoadOutcome};
use crate::host::{RasterTicket, Rasterizer};

/// Default color stops, sky blue fading into deep blue.
const DEFAULT_COLORS: [&str; 2] = ["#8ED6FF", "#004CB3"];

/// Options for [`RadialLightLayer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadialLightOptions {
    /// Draw-order key; the glow renders behind all fragments and behind the
    /// star field.
    pub z: i32,
    /// Horizontal lock flag (feeds the influence factor).
    pub h_lock: bool,
    /// Vertical lock flag.
    pub v_lock: bool,
    /// Scroll modulation speed for the glow position.
    pub velocity: f32,
    /// Outer-radius expansion coefficient.
    pub expansion: f32,
    /// Ordered gradient colors (at least two).
    pub colors: Vec<Rgba>,
}

impl Default for RadialLightOptions {
    fn default() -> Self {
        Self {
            z: -11,
            h_lock: false,
            v_lock: false,
            velocity: 0.5,
            expansion: 3.0,
            colors: DEFAULT_COLORS
                .iter()
                .map(|hex| Rgba::from_hex(hex).unwrap_or(Rgba::WHITE))
                .collect(),
        }
    }
}

/// Procedural radial-gradient glow layer.
pub struct RadialLightLayer {
    /// Explicit layer region, recomputed on every resize.
    bounds: Bounds,
    /// Draw-order key.
    z: i32,
    /// Horizontal lock flag.
    h_lock: bool,
    /// Vertical lock flag.
    v_lock: bool,
    /// Scroll modulation speed.
    velocity: f32,
    /// Outer-radius expansion coefficient.
    expansion: f32,
    /// Ordered gradient colors.
    colors: Vec<Rgba>,
}

impl RadialLightLayer {
    /// Create a radial light layer.
    #[must_use]
    pub fn new(options: RadialLightOptions) -> Self {
        Self {
            bounds: Bounds::default(),
            z: options.z,
            h_lock: options.h_lock,
            v_lock: options.v_lock,
            velocity: options.velocity,
            expansion: options.expansion,
            colors: options.colors,
        }
    }

    /// Glow position for a scroll offset: each axis is scroll times the
    /// modulation velocity, wrapped at the bounds maximum.
    #[must_use]
    pub fn modulated_position(&self, scroll: Point) -> Point {
        Point::new(
            (scroll.x * self.velocity) % self.bounds.max_x,
            (scroll.y * self.velocity) % self.bounds.max_y,
        )
    }

    /// Base radius of the glow: one third of the bounds height.
    #[must_use]
    pub fn base_radius(&self) -> f32 {
        self.bounds.height() / 3.0
    }

    /// Outer gradient radius for a scroll offset.
    ///
    /// The radius grows with the magnitude of the influence factor, so
    /// scrolling along the rated axis subtly "breathes" the glow:
    /// `base * (expansion - 1 + |factor|)`.
    #[must_use]
    pub fn outer_radius(&self, scroll: Point) -> f32 {
        let position = self.modulated_position(scroll);
        let f = factor(
            position.x,
            position.y,
            &self.bounds,
            self.h_lock,
            self.v_lock,
        );
        self.base_radius() * (self.expansion - 1.0 + f.abs())
    }

    /// Evenly distributed gradient stops across the color list.
    #[allow(clippy::cast_precision_loss)]
    fn stops(&self) -> Vec<(f32, Rgba)> {
        let count = self.colors.len();
        if count == 1 {
            return vec![(0.0, self.colors[0])];
        }
        self.colors
            .iter()
            .enumerate()
            .map(|(i, &color)| (i as f32 / (count - 1) as f32, color))
            .collect()
    }
}

impl Entity for RadialLightLayer {
    fn z(&self) -> i32 {
        self.z
    }

    fn load(&mut self, _rasterizer: &mut dyn Rasterizer) -> LoadOutcome {
        LoadOutcome::Ready
    }

    fn reload(&mut self, _rasterizer: &mut dyn Rasterizer) -> LoadOutcome {
        LoadOutcome::Ready
    }

    fn pending_ticket(&self) -> Option<RasterTicket> {
        None
    }

    fn finish_load(&mut self, _image: Option<RasterImage>, _viewport_center: Point) {}

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn invalidate(&mut self) {}

    fn sync(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn move_to(&mut self, _scroll: Point) {}

    fn draw(&mut self, surface: &mut Surface, scroll: Point) {
        if self.bounds.width() <= 0.0 || self.bounds.height() <= 0.0 || self.colors.is_empty() {
            return;
        }
        let radius = self.base_radius();
        let center = Point::new(
            radius.mul_add(0.8, self.bounds.min_x),
            radius.mul_add(0.8, self.bounds.min_y),
        );
        let rect = self.bounds.to_rect();
        surface.fill_radial_gradient(
            &rect,
            center,
            radius,
            self.outer_radius(scroll),
            &self.stops(),
        );
    }
}
