//! Parallax composition engine.
//!
//! This crate drives the whole pipeline from host-discovered markup anchors
//! to a composited surface:
//!
//! - **Host seams** — [`host`] defines the traits the embedding environment
//!   implements: anchor discovery, asynchronous markup rasterization, and
//!   the viewport (scroll, size, pixel ratio).
//! - **Entities** — [`fragment`] wraps one anchor in a depth-aware drawable;
//!   [`layer`] provides the procedural star-field and radial-light
//!   backgrounds. Both implement the [`entity::Entity`] seam.
//! - **Composition** — [`screen`] owns the surface and the sequential load
//!   queue; [`engine`] validates the configuration, boots the screen, and
//!   exposes the host event entry points.

pub mod drawable;
pub mod engine;
pub mod entity;
pub mod fragment;
pub mod host;
pub mod layer;
pub mod screen;
pub mod src;

pub use drawable::Drawable;
pub use engine::{
    Engine, EngineError, EngineOptions, LayerRequest, RADIAL_LIGHT_LAYER, STAR_FIELD_LAYER,
};
pub use entity::{Entity, LoadOutcome};
pub use fragment::{Fragment, FragmentOptions, LoadState};
pub use host::{Anchor, Discovery, RasterRequest, RasterTicket, Rasterizer, Viewport};
pub use layer::{RadialLightLayer, RadialLightOptions, Star, StarFieldLayer, StarFieldOptions};
pub use screen::{DoneCallback, Screen};
pub use src::Src;
