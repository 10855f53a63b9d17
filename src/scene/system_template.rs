//! Serializable body system descriptions
//!
//! A system template lists bodies in build order. A body with a `parent`
//! is positioned relative to it and, unless it gives its own velocity,
//! starts on a circular orbit.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use orrery_math::Vec2;
use orrery_physics::{BodyDef, PhysicsConfig, World};
use serde::{Deserialize, Serialize};

use super::system_builder::{SystemBuildError, SystemBuilder};

/// A body system that can be saved and loaded
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemTemplate {
    /// System name
    pub name: String,
    /// Bodies, parents before children
    pub bodies: Vec<BodyTemplate>,
}

/// A single body in a system template
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    /// Unique body name
    pub name: String,
    /// Body radius
    pub radius: f64,
    /// Absolute position, or the offset from `parent`
    pub position: [f64; 2],
    /// Mass; `radius³` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    /// Velocity; relative to `parent` when one is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<[f64; 2]>,
    /// Body this one orbits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl BodyTemplate {
    /// A free body at an absolute position
    pub fn new(name: impl Into<String>, position: [f64; 2], radius: f64) -> Self {
        Self {
            name: name.into(),
            radius,
            position,
            mass: None,
            velocity: None,
            parent: None,
        }
    }

    /// Place this body relative to a parent
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set an explicit mass
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Set an explicit velocity
    pub fn with_velocity(mut self, velocity: [f64; 2]) -> Self {
        self.velocity = Some(velocity);
        self
    }
}

impl SystemTemplate {
    /// Create an empty system
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: Vec::new(),
        }
    }

    /// Add a body template
    pub fn add_body(&mut self, body: BodyTemplate) {
        self.bodies.push(body);
    }

    /// The built-in demo: a star with nine planets stacked above it
    ///
    /// Planet `i` has radius `i`, the default `i³` mass and sits
    /// `100 + 40i` units above the star on a circular orbit.
    pub fn solar_default() -> Self {
        let mut system = Self::new("Solar");
        system.add_body(BodyTemplate::new("sun", [500.0, 500.0], 100.0));
        for i in 1..=9 {
            let distance = 100.0 + 40.0 * i as f64;
            system.add_body(
                BodyTemplate::new(format!("planet_{}", i), [0.0, -distance], i as f64)
                    .with_parent("sun"),
            );
        }
        system
    }

    /// Load a system from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SystemLoadError> {
        let contents = fs::read_to_string(path)?;
        let system = ron::from_str(&contents)?;
        Ok(system)
    }

    /// Save a system to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SystemSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Build a physics world from this system
    pub fn instantiate(&self, config: PhysicsConfig) -> Result<World, SystemBuildError> {
        let mut builder = SystemBuilder::new(config);
        for body in &self.bodies {
            let position = Vec2::from(body.position);
            let velocity = body.velocity.map(Vec2::from);
            builder = match &body.parent {
                Some(parent) => {
                    builder.orbiting_with(&body.name, parent, position, body.radius, body.mass, velocity)?
                }
                None => {
                    let mut def = BodyDef::new(position, body.radius);
                    def.mass = body.mass;
                    def.velocity = velocity;
                    builder.body(&body.name, def)?
                }
            };
        }
        log::info!("Instantiated system '{}'", self.name);
        Ok(builder.build())
    }
}

/// Error loading a system
#[derive(Debug)]
pub enum SystemLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SystemLoadError {
    fn from(e: io::Error) -> Self {
        SystemLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SystemLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SystemLoadError::Parse(e)
    }
}

impl fmt::Display for SystemLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemLoadError::Io(e) => write!(f, "IO error: {}", e),
            SystemLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SystemLoadError {}

/// Error saving a system
#[derive(Debug)]
pub enum SystemSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SystemSaveError {
    fn from(e: io::Error) -> Self {
        SystemSaveError::Io(e)
    }
}

impl From<ron::Error> for SystemSaveError {
    fn from(e: ron::Error) -> Self {
        SystemSaveError::Serialize(e)
    }
}

impl fmt::Display for SystemSaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemSaveError::Io(e) => write!(f, "IO error: {}", e),
            SystemSaveError::Serialize(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for SystemSaveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solar_default_layout() {
        let system = SystemTemplate::solar_default();
        assert_eq!(system.bodies.len(), 10);
        assert_eq!(system.bodies[0].name, "sun");

        let world = system.instantiate(PhysicsConfig::default()).unwrap();
        let sun = world.get("sun").unwrap();
        assert_eq!(sun.mass, 1_000_000.0);

        let p3 = world.get("planet_3").unwrap();
        assert_eq!(p3.position, Vec2::new(500.0, 280.0));
        assert_eq!(p3.mass, 27.0);
        assert!(p3.velocity().x > 0.0);
        assert_eq!(p3.velocity().y, 0.0);
    }

    #[test]
    fn test_parse_with_defaults() {
        let ron = r#"
            SystemTemplate(
                name: "Binary",
                bodies: [
                    (name: "a", radius: 2.0, position: (0.0, 0.0)),
                    (name: "b", radius: 1.0, position: (10.0, 0.0), mass: Some(4.0), parent: Some("a")),
                ],
            )
        "#;
        let system: SystemTemplate = ron::from_str(ron).unwrap();
        assert_eq!(system.bodies[0].mass, None);
        assert_eq!(system.bodies[1].parent.as_deref(), Some("a"));

        let world = system.instantiate(PhysicsConfig::new(1.0)).unwrap();
        let b = world.get("b").unwrap();
        assert_eq!(b.position, Vec2::new(10.0, 0.0));
        assert_eq!(b.mass, 4.0);
        // sqrt(1 * (8 + 4) / 10) along +y
        let expected = (12.0f64 / 10.0).sqrt();
        assert!((b.velocity().y - expected).abs() < 1e-12);
    }

    #[test]
    fn test_serialize_mentions_bodies() {
        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        let serialized = ron::ser::to_string_pretty(&SystemTemplate::solar_default(), pretty).unwrap();
        assert!(serialized.contains("Solar"));
        assert!(serialized.contains("planet_9"));
        assert!(!serialized.contains("mass"));
    }

    #[test]
    fn test_parent_must_come_first() {
        let mut system = SystemTemplate::new("Backwards");
        system.add_body(BodyTemplate::new("moon", [1.0, 0.0], 1.0).with_parent("earth"));
        system.add_body(BodyTemplate::new("earth", [0.0, 0.0], 1.0));
        assert!(matches!(
            system.instantiate(PhysicsConfig::new(1.0)),
            Err(SystemBuildError::UnknownParent(_))
        ));
    }

    #[test]
    fn test_explicit_velocity_is_kept() {
        let mut system = SystemTemplate::new("Drift");
        system.add_body(BodyTemplate::new("rock", [0.0, 0.0], 1.0).with_velocity([3.0, -1.0]));
        let world = system.instantiate(PhysicsConfig::new(1.0)).unwrap();
        assert_eq!(world.get("rock").unwrap().velocity(), Vec2::new(3.0, -1.0));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SystemTemplate::load("definitely/not/here.ron");
        assert!(matches!(result, Err(SystemLoadError::Io(_))));
    }
}
