//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ORRERY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use orrery_anim::Easing;
use orrery_physics::{PhysicsConfig, UnitSystem, G_SI};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gravity simulation configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// View transition configuration
    #[serde(default)]
    pub view: ViewConfig,
    /// Body system source
    #[serde(default)]
    pub system: SystemConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ORRERY_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // ORRERY_SIMULATION__TIME_SCALE=5e4 -> simulation.time_scale = 50000.0
        figment = figment.merge(Env::prefixed("ORRERY_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Gravity simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravitational constant in SI units
    pub gravitational_constant: f64,
    /// Metres per simulation length unit
    pub length_unit: f64,
    /// Kilograms per simulation mass unit
    pub mass_unit: f64,
    /// Seconds per simulation time unit
    pub time_unit: f64,
    /// Simulation time units per wall-clock second
    pub time_scale: f64,
    /// Longest frame delta that is simulated (seconds)
    pub max_frame_dt: f64,
    /// Integration substep (wall-clock seconds)
    pub substep: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G_SI,
            length_unit: 1.0,
            mass_unit: 1.0,
            time_unit: 1.0,
            time_scale: 100_000.0,
            max_frame_dt: 1.0,
            substep: 0.01,
        }
    }
}

impl SimulationConfig {
    /// Convert to the physics engine's configuration
    pub fn to_physics_config(&self) -> PhysicsConfig {
        PhysicsConfig::new(self.gravitational_constant)
            .with_units(UnitSystem::new(self.length_unit, self.mass_unit, self.time_unit))
            .with_time_scale(self.time_scale)
            .with_stepping(self.substep, self.max_frame_dt)
    }
}

/// View transition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Seconds to glide to a newly tracked body
    pub recenter_seconds: f64,
    /// Seconds to settle a zoom change
    pub zoom_seconds: f64,
    /// Starting zoom factor
    pub initial_zoom: f64,
    /// Easing preset for view transitions
    pub easing: Easing,
    /// Body tracked at startup
    pub track: Option<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            recenter_seconds: 1.0,
            zoom_seconds: 0.5,
            initial_zoom: 1.0,
            easing: Easing::SineInOut,
            track: Some("sun".to_string()),
        }
    }
}

/// Body system source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// RON system template; the built-in solar system when unset
    pub path: Option<String>,
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Frames to run in headless mode
    pub frames: u32,
    /// Fixed frame delta for headless runs; wall clock when unset
    pub frame_dt: Option<f64>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frames: 600,
            frame_dt: Some(1.0 / 60.0),
        }
    }
}

/// Configuration error
///
/// Carries the underlying figment error, which names the offending key and
/// the source it came from.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError(Box::new(e))
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.0)
    }
}
