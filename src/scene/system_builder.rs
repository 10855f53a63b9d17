//! SystemBuilder - Declarative body system construction
//!
//! Provides a fluent API for placing stars and setting planets on
//! circular orbits around them.

use std::fmt;

use orrery_math::Vec2;
use orrery_physics::{BodyDef, PhysicsConfig, PhysicsError, World};

/// Builder for constructing gravitating body systems
///
/// # Example
/// ```ignore
/// let world = SystemBuilder::new(PhysicsConfig::default())
///     .star("sun", Vec2::new(500.0, 500.0), 100.0)?
///     .orbiting("earth", "sun", Vec2::new(0.0, -180.0), 3.0, None)?
///     .build();
/// ```
pub struct SystemBuilder {
    world: World,
}

impl SystemBuilder {
    /// Create a builder for an empty world
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            world: World::with_config(config),
        }
    }

    /// Add a body exactly as described
    pub fn body(mut self, name: &str, def: BodyDef) -> Result<Self, SystemBuildError> {
        // Allocate, describe, then register: a failed definition leaves
        // an unnamed body that is never simulated
        let key = self.world.create_body();
        self.world.define_body(key, &def)?;
        self.world.add_to_world(name, key)?;
        log::debug!("Added body '{}' at ({:.1}, {:.1})", name, def.position.x, def.position.y);
        Ok(self)
    }

    /// Add a body at rest with the default `radius³` mass
    pub fn star(self, name: &str, position: Vec2, radius: f64) -> Result<Self, SystemBuildError> {
        self.body(name, BodyDef::new(position, radius))
    }

    /// Add a body on a circular orbit around `parent`
    ///
    /// `offset` is the position relative to the parent. The body moves
    /// counter-clockwise (in screen terms, with y pointing down, a body
    /// placed above its parent moves toward +x) and inherits the parent's
    /// velocity.
    pub fn orbiting(
        self,
        name: &str,
        parent: &str,
        offset: Vec2,
        radius: f64,
        mass: Option<f64>,
    ) -> Result<Self, SystemBuildError> {
        self.orbiting_with(name, parent, offset, radius, mass, None)
    }

    /// Add a body placed relative to `parent`
    ///
    /// With `relative_velocity` unset the body gets circular-orbit speed.
    pub fn orbiting_with(
        self,
        name: &str,
        parent: &str,
        offset: Vec2,
        radius: f64,
        mass: Option<f64>,
        relative_velocity: Option<Vec2>,
    ) -> Result<Self, SystemBuildError> {
        let parent_body = self
            .world
            .get(parent)
            .ok_or_else(|| SystemBuildError::UnknownParent(parent.to_string()))?;

        let mut def = BodyDef::new(parent_body.position + offset, radius);
        def.mass = mass;

        let relative = match relative_velocity {
            Some(v) => v,
            None => circular_orbit_velocity(
                self.world.config.effective_g(),
                parent_body.mass,
                def.resolved_mass(),
                offset,
            ),
        };
        let def = def.with_velocity(parent_body.velocity() + relative);

        self.body(name, def)
    }

    /// Finish building and return the world
    pub fn build(self) -> World {
        log::info!("Built system with {} bodies", self.world.len());
        self.world
    }
}

/// Velocity for a circular orbit at `offset` from a parent of `parent_mass`
///
/// Magnitude `sqrt(G (M + m) / d)`, directed along the counter-clockwise
/// perpendicular of the offset. A zero offset yields zero velocity.
pub fn circular_orbit_velocity(g: f64, parent_mass: f64, mass: f64, offset: Vec2) -> Vec2 {
    let distance = offset.magnitude();
    if distance <= 0.0 {
        return Vec2::ZERO;
    }
    let speed = (g * (parent_mass + mass) / distance).sqrt();
    offset.normalized().perp() * speed
}

/// Error building a body system
#[derive(Debug)]
pub enum SystemBuildError {
    /// A body named a parent that does not exist (yet)
    UnknownParent(String),
    /// The physics world rejected a body
    Physics(PhysicsError),
}

impl From<PhysicsError> for SystemBuildError {
    fn from(e: PhysicsError) -> Self {
        SystemBuildError::Physics(e)
    }
}

impl fmt::Display for SystemBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemBuildError::UnknownParent(name) => write!(f, "Unknown parent body: {}", name),
            SystemBuildError::Physics(e) => write!(f, "Physics error: {}", e),
        }
    }
}

impl std::error::Error for SystemBuildError {}
