//! Software raster backend for the Strata compositor.
//!
//! # Scope
//!
//! This crate provides:
//! - **Colors** - RGBA values with hex parsing and HSV conversion
//! - **Raster Images** - decoded RGBA pixel data handed over by the host
//! - **Surface** - the compositing surface the screen clears and redraws
//!   every frame, with device pixel-density correction
//!
//! The surface knows nothing about scrolling, depth, or fragments; it only
//! executes drawing operations (clear, blit, circle, radial gradient).

pub mod color;
pub mod image;
pub mod surface;

pub use color::{ParseColorError, Rgba};
pub use image::RasterImage;
pub use surface::Surface;
