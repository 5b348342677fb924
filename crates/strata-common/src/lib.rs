//! Common utilities for the Strata compositor.
//!
//! This crate provides shared infrastructure used by all compositor
//! components:
//! - **Warning System** - colored terminal output for recoverable failures

pub mod warning;
