//! N-body gravity simulation for orrery
//!
//! This crate provides a real-time gravity simulation, including:
//! - Bodies whose velocity is derived from position history
//! - Pairwise Newtonian force accumulation
//! - Variable-step position Verlet integration
//! - Frame delta clamping and substepping
//! - A configurable unit system for the gravitational constant

pub mod body;
pub mod clock;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod world;

// Re-export commonly used types
pub use body::{clamp_dt, clamp_mass, Body, BodyDef, BodyKey, MIN_DT, MIN_MASS};
pub use clock::{Substepper, MAX_SUBSTEPS};
pub use config::{PhysicsConfig, UnitSystem, DEFAULT_MAX_FRAME_DT, DEFAULT_SUBSTEP, G_SI};
pub use error::PhysicsError;
pub use forces::{accumulate_forces, gravitational_force, pairwise_force};
pub use integrator::{integrate_all, verlet_step};
pub use world::World;
