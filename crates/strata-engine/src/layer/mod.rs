//! Procedural background layers.
//!
//! A layer is an entity whose imagery is generated against an explicit
//! bounds rectangle rather than rasterized from markup: it has no anchor, no
//! rasterization ticket, and loads instantly. Its bounds are recomputed on
//! every resize and its procedural payload regenerated whenever they change.
//!
//! Two variants exist:
//! - [`StarFieldLayer`] — a toroidally wrapping star field whose star radii
//!   double as per-star depth speeds
//! - [`RadialLightLayer`] — a scroll-modulated radial glow drawn behind all
//!   fragments

pub mod radial_light;
pub mod star_field;

pub use radial_light::{RadialLightLayer, RadialLightOptions};
pub use star_field::{Star, StarFieldLayer, StarFieldOptions};
