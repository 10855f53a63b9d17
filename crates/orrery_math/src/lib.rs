//! 2D Mathematics Library
//!
//! This crate provides the vector type shared by the orrery physics and
//! animation crates.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components in `f64`

mod vec2;

pub use vec2::Vec2;
