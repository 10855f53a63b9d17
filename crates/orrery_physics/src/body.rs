//! Gravitating bodies
//!
//! A body stores its current and previous position plus the duration of the
//! step between them. Velocity is never stored; it is derived from that
//! history and written back by rewriting the history.

use crate::error::PhysicsError;
use orrery_math::Vec2;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Key to a body in the world
    ///
    /// Generational, so a key to a removed body stays invalid even after its
    /// slot is reused.
    pub struct BodyKey;
}

/// Smallest step duration the integrator accepts
pub const MIN_DT: f64 = 1e-9;

/// Smallest mass a body can carry
pub const MIN_MASS: f64 = f64::MIN_POSITIVE;

/// A point mass integrated with position Verlet
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Current position
    pub position: Vec2,
    /// Radius (used for default mass and by presentation code)
    pub radius: f64,
    /// Mass, always positive
    pub mass: f64,
    prev_position: Vec2,
    prev_dt: f64,
    force: Vec2,
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0)
    }
}

impl Body {
    /// Create a body at rest with mass `radius³`
    ///
    /// A radius that yields no positive mass gets [`MIN_MASS`]; use
    /// [`BodyDef::build`] to reject such bodies instead.
    pub fn new(position: Vec2, radius: f64) -> Self {
        Self {
            position,
            radius,
            mass: clamp_mass(radius * radius * radius),
            prev_position: position,
            prev_dt: 1.0,
            force: Vec2::ZERO,
        }
    }

    /// Set the mass of this body, clamped by [`clamp_mass`]
    pub fn with_mass(mut self, mass: f64) -> Self {
        let clamped = clamp_mass(mass);
        if clamped != mass {
            log::warn!("Invalid body mass {}, clamping to {:e}", mass, clamped);
        }
        self.mass = clamped;
        self
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.set_velocity(velocity);
        self
    }

    /// Velocity derived from the last step: `(pos - prev_pos) / prev_dt`
    pub fn velocity(&self) -> Vec2 {
        (self.position - self.prev_position) / self.prev_dt
    }

    /// Normalize the history so the next step continues with `velocity`
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.prev_position = self.position - velocity;
        self.prev_dt = 1.0;
    }

    /// Move the body without changing its velocity
    pub fn set_position(&mut self, position: Vec2) {
        let velocity = self.velocity();
        self.position = position;
        self.set_velocity(velocity);
    }

    /// Position at the previous integration step
    pub fn prev_position(&self) -> Vec2 {
        self.prev_position
    }

    /// Duration of the previous integration step
    pub fn prev_dt(&self) -> f64 {
        self.prev_dt
    }

    /// Force accumulated for the current substep
    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub(crate) fn set_force(&mut self, force: Vec2) {
        self.force = force;
    }

    /// Overwrite the raw position history
    ///
    /// A `prev_dt` that is not a positive finite number is clamped to [`MIN_DT`].
    pub fn set_history(&mut self, prev_position: Vec2, prev_dt: f64) {
        self.prev_position = prev_position;
        self.prev_dt = clamp_dt(prev_dt);
    }

    /// Shift to a new position, recording the step that produced it
    pub(crate) fn advance(&mut self, new_position: Vec2, dt: f64) {
        self.prev_position = self.position;
        self.position = new_position;
        self.prev_dt = dt;
    }

    /// Linear momentum `m · v`
    pub fn momentum(&self) -> Vec2 {
        self.velocity() * self.mass
    }

    /// Kinetic energy `½ m |v|²`
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity().magnitude_squared()
    }
}

/// Clamp a duration to the smallest positive step
pub fn clamp_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt >= MIN_DT {
        dt
    } else {
        MIN_DT
    }
}

/// Clamp a mass to the smallest positive value
///
/// Zero, negative and non-finite masses become [`MIN_MASS`], so `force / mass`
/// stays finite.
pub fn clamp_mass(mass: f64) -> f64 {
    if mass.is_finite() && mass >= MIN_MASS {
        mass
    } else {
        MIN_MASS
    }
}

/// Declarative description of a body, applied with `World::define_body`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyDef {
    /// Initial position
    pub position: Vec2,
    /// Radius, must be non-negative
    pub radius: f64,
    /// Mass; `radius³` when omitted
    #[serde(default)]
    pub mass: Option<f64>,
    /// Initial velocity; at rest when omitted
    #[serde(default)]
    pub velocity: Option<Vec2>,
}

impl BodyDef {
    /// Describe a body at rest
    pub fn new(position: Vec2, radius: f64) -> Self {
        Self {
            position,
            radius,
            mass: None,
            velocity: None,
        }
    }

    /// Set an explicit mass
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Set an initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// The mass after defaulting
    pub fn resolved_mass(&self) -> f64 {
        self.mass.unwrap_or(self.radius * self.radius * self.radius)
    }

    /// Validate and build the body
    pub fn build(&self) -> Result<Body, PhysicsError> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(PhysicsError::InvalidRadius(self.radius));
        }
        let mass = self.resolved_mass();
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }

        let mut body = Body::new(self.position, self.radius).with_mass(mass);
        if let Some(velocity) = self.velocity {
            body.set_velocity(velocity);
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_body_is_at_rest() {
        let body = Body::new(Vec2::new(1.0, 2.0), 2.0);
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(body.mass, 8.0);
        assert_eq!(body.prev_dt(), 1.0);
        assert_eq!(body.force(), Vec2::ZERO);
    }

    #[test]
    fn test_set_velocity_normalizes_history() {
        let mut body = Body::new(Vec2::new(10.0, 0.0), 1.0);
        body.set_history(Vec2::new(9.0, 0.0), 0.25);
        assert_eq!(body.velocity(), Vec2::new(4.0, 0.0));

        body.set_velocity(Vec2::new(0.0, 3.0));
        assert_eq!(body.prev_position(), Vec2::new(10.0, -3.0));
        assert_eq!(body.prev_dt(), 1.0);
        assert_eq!(body.velocity(), Vec2::new(0.0, 3.0));
    }

    #[test]
    fn test_set_position_keeps_velocity() {
        let mut body = Body::new(Vec2::ZERO, 1.0).with_velocity(Vec2::new(1.0, -1.0));
        body.set_position(Vec2::new(50.0, 50.0));
        assert_eq!(body.position, Vec2::new(50.0, 50.0));
        assert_eq!(body.velocity(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_zero_prev_dt_is_clamped() {
        let mut body = Body::new(Vec2::ZERO, 1.0);
        body.set_history(Vec2::new(-1.0, 0.0), 0.0);
        assert_eq!(body.prev_dt(), MIN_DT);
        assert!(body.velocity().is_finite());

        body.set_history(Vec2::ZERO, -3.0);
        assert_eq!(body.prev_dt(), MIN_DT);

        body.set_history(Vec2::ZERO, f64::NAN);
        assert_eq!(body.prev_dt(), MIN_DT);
    }

    #[test]
    fn test_massless_bodies_are_clamped() {
        assert_eq!(Body::new(Vec2::ZERO, 0.0).mass, MIN_MASS);
        assert_eq!(Body::new(Vec2::ZERO, 1.0).with_mass(0.0).mass, MIN_MASS);
        assert_eq!(Body::new(Vec2::ZERO, 1.0).with_mass(-2.0).mass, MIN_MASS);
        assert_eq!(Body::new(Vec2::ZERO, 1.0).with_mass(f64::NAN).mass, MIN_MASS);
        assert_eq!(Body::new(Vec2::ZERO, 1.0).with_mass(1e-30).mass, 1e-30);
    }

    #[test]
    fn test_momentum_and_energy() {
        let body = Body::new(Vec2::ZERO, 1.0)
            .with_mass(2.0)
            .with_velocity(Vec2::new(3.0, 4.0));
        assert_eq!(body.momentum(), Vec2::new(6.0, 8.0));
        assert_eq!(body.kinetic_energy(), 25.0);
    }

    #[test]
    fn test_body_def_defaults_mass_to_radius_cubed() {
        let body = BodyDef::new(Vec2::ZERO, 3.0).build().unwrap();
        assert_eq!(body.mass, 27.0);
        assert_eq!(body.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_body_def_explicit_mass_and_velocity() {
        let body = BodyDef::new(Vec2::new(1.0, 1.0), 3.0)
            .with_mass(5.0)
            .with_velocity(Vec2::new(0.5, 0.0))
            .build()
            .unwrap();
        assert_eq!(body.mass, 5.0);
        assert_eq!(body.velocity(), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_body_def_rejects_invalid_values() {
        assert_eq!(
            BodyDef::new(Vec2::ZERO, -1.0).build(),
            Err(PhysicsError::InvalidRadius(-1.0))
        );
        // Zero radius without explicit mass resolves to zero mass
        assert_eq!(
            BodyDef::new(Vec2::ZERO, 0.0).build(),
            Err(PhysicsError::InvalidMass(0.0))
        );
        assert!(BodyDef::new(Vec2::ZERO, 0.0).with_mass(1.0).build().is_ok());
    }
}
