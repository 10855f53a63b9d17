//! Orrery - N-body gravity simulation with eased view transitions
//!
//! The library half of the application: configuration, body system
//! composition and the per-frame driver. The binary in `main.rs` runs it.

pub mod config;
pub mod scene;
pub mod systems;
