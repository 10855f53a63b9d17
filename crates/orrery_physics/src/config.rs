//! Unit system and stepping configuration

use serde::{Deserialize, Serialize};

/// Newtonian gravitational constant in SI units (m³ kg⁻¹ s⁻²)
pub const G_SI: f64 = 6.674e-11;

/// Substep used when none (or an unusable one) is configured, in seconds
pub const DEFAULT_SUBSTEP: f64 = 0.01;

/// Frame delta clamp used when none (or an unusable one) is configured
pub const DEFAULT_MAX_FRAME_DT: f64 = 1.0;

/// Size of one simulation unit expressed in SI units
///
/// Positions, masses and step durations handed to the world are all measured
/// in these units. The gravitational constant is rescaled once per world so
/// forces stay well-conditioned: `G' = G · mass · time² / length³`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitSystem {
    /// Metres per length unit
    pub length: f64,
    /// Kilograms per mass unit
    pub mass: f64,
    /// Seconds per time unit
    pub time: f64,
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::SI
    }
}

impl UnitSystem {
    /// Metres, kilograms, seconds
    pub const SI: Self = Self {
        length: 1.0,
        mass: 1.0,
        time: 1.0,
    };

    /// Astronomical units, solar masses, days
    pub const ASTRONOMICAL: Self = Self {
        length: 1.495_978_707e11,
        mass: 1.988_47e30,
        time: 86_400.0,
    };

    /// Create a unit system from SI scale factors
    pub fn new(length: f64, mass: f64, time: f64) -> Self {
        Self { length, mass, time }
    }

    /// Express an SI gravitational constant in these units
    pub fn scale_g(&self, g_si: f64) -> f64 {
        g_si * self.mass * self.time * self.time / (self.length * self.length * self.length)
    }
}

/// Configuration for the gravity simulation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravitational constant in SI units
    pub gravitational_constant: f64,
    /// Unit system the world's positions and masses are expressed in
    pub units: UnitSystem,
    /// Simulation time units per wall-clock second
    pub time_scale: f64,
    /// Longest wall-clock frame delta that is simulated (seconds)
    pub max_frame_dt: f64,
    /// Wall-clock length of one integration substep (seconds)
    pub substep: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G_SI,
            units: UnitSystem::SI,
            time_scale: 1.0,
            max_frame_dt: DEFAULT_MAX_FRAME_DT,
            substep: DEFAULT_SUBSTEP,
        }
    }
}

impl PhysicsConfig {
    /// Create a config with the given constant in raw simulation units
    pub fn new(gravitational_constant: f64) -> Self {
        Self {
            gravitational_constant,
            ..Self::default()
        }
    }

    /// Set the unit system
    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    /// Set how many simulation time units pass per wall-clock second
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Set the substep length and frame delta clamp (wall-clock seconds)
    ///
    /// Values that are not positive and finite fall back to the defaults.
    pub fn with_stepping(mut self, substep: f64, max_frame_dt: f64) -> Self {
        self.substep = if substep.is_finite() && substep > 0.0 {
            substep
        } else {
            log::warn!("Invalid substep {}, using {}", substep, DEFAULT_SUBSTEP);
            DEFAULT_SUBSTEP
        };
        self.max_frame_dt = if max_frame_dt.is_finite() && max_frame_dt > 0.0 {
            max_frame_dt
        } else {
            log::warn!("Invalid max frame delta {}, using {}", max_frame_dt, DEFAULT_MAX_FRAME_DT);
            DEFAULT_MAX_FRAME_DT
        };
        self
    }

    /// The gravitational constant expressed in the world's units
    pub fn effective_g(&self) -> f64 {
        self.units.scale_g(self.gravitational_constant)
    }
}
