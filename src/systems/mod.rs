//! Application systems
//!
//! The per-frame driver and the animated view it keeps in sync.

mod simulation;
pub mod view;

pub use simulation::{FrameStats, SimulationSystem};
pub use view::ViewState;
