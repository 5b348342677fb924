//! Geometry primitives and parallax math for the Strata compositor.
//!
//! # Scope
//!
//! This crate provides:
//! - **Value Types** - [`Rect`], [`Point`], and [`Bounds`]
//! - **Transform Math** - the depth-to-offset formula and the bounded
//!   influence ("factor") function used by the procedural layers
//!
//! Everything here is plain data and pure functions; no component in this
//! crate knows about scrolling events, raster surfaces, or the host page.

pub mod rect;
pub mod transform;

pub use rect::{Bounds, Point, Rect};
pub use transform::{factor, parallax_offset, rate};
