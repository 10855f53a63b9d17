//! Body system construction
//!
//! [`SystemBuilder`] composes a world in code; [`SystemTemplate`] is the
//! same description in a RON file.

mod system_builder;
mod system_template;

pub use system_builder::{circular_orbit_velocity, SystemBuildError, SystemBuilder};
pub use system_template::{BodyTemplate, SystemLoadError, SystemSaveError, SystemTemplate};
