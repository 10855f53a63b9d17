//! Gravity world and simulation

use crate::body::{Body, BodyDef, BodyKey};
use crate::clock::Substepper;
use crate::config::PhysicsConfig;
use crate::error::PhysicsError;
use crate::forces::accumulate_forces;
use crate::integrator::integrate_all;
use orrery_math::Vec2;
use slotmap::{SecondaryMap, SlotMap};
use std::collections::HashMap;

/// The world containing all gravitating bodies
///
/// Bodies are created, defined, then added under a unique name. Only named
/// bodies take part in the simulation, and every one of them attracts every
/// other; any parent/child structure used while building is not consulted.
pub struct World {
    /// Every created body, named or not (generational keys)
    bodies: SlotMap<BodyKey, Body>,
    /// Simulated bodies in insertion order
    members: Vec<BodyKey>,
    /// Name lookup
    names: HashMap<String, BodyKey>,
    /// Reverse lookup for members
    labels: SecondaryMap<BodyKey, String>,
    /// Physics configuration
    pub config: PhysicsConfig,
    simulated_time: f64,
    last_substeps: usize,
}

impl World {
    /// Create a new world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            members: Vec::new(),
            names: HashMap::new(),
            labels: SecondaryMap::new(),
            config,
            simulated_time: 0.0,
            last_substeps: 0,
        }
    }

    /// Allocate a body that is not yet part of the simulation
    pub fn create_body(&mut self) -> BodyKey {
        self.bodies.insert(Body::default())
    }

    /// Replace a created body's state from a definition
    pub fn define_body(&mut self, key: BodyKey, def: &BodyDef) -> Result<(), PhysicsError> {
        let body = self.bodies.get_mut(key).ok_or(PhysicsError::UnknownBody)?;
        *body = def.build()?;
        Ok(())
    }

    /// Add a created body to the simulation under a unique name
    pub fn add_to_world(&mut self, name: impl Into<String>, key: BodyKey) -> Result<(), PhysicsError> {
        let name = name.into();
        if !self.bodies.contains_key(key) {
            return Err(PhysicsError::UnknownBody);
        }
        if self.names.contains_key(&name) {
            return Err(PhysicsError::DuplicateName(name));
        }
        if let Some(existing) = self.labels.get(key) {
            return Err(PhysicsError::AlreadyInWorld(existing.clone()));
        }

        log::debug!("Added body '{}' to world", name);
        self.names.insert(name.clone(), key);
        self.labels.insert(key, name);
        self.members.push(key);
        Ok(())
    }

    /// Create, define and add a body in one call
    pub fn spawn(&mut self, name: impl Into<String>, def: &BodyDef) -> Result<BodyKey, PhysicsError> {
        let body = def.build()?;
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(PhysicsError::DuplicateName(name));
        }
        let key = self.bodies.insert(body);
        self.add_to_world(name, key)?;
        Ok(key)
    }

    /// Remove a named body and return it
    pub fn remove(&mut self, name: &str) -> Option<Body> {
        let key = self.names.remove(name)?;
        self.labels.remove(key);
        self.members.retain(|&k| k != key);
        self.bodies.remove(key)
    }

    /// Get a body by key, whether or not it is named
    pub fn get_body(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    /// Get a mutable body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.bodies.get_mut(key)
    }

    /// Get a body by name
    pub fn get(&self, name: &str) -> Option<&Body> {
        self.names.get(name).and_then(|&key| self.bodies.get(key))
    }

    /// Get a mutable body by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Body> {
        let key = *self.names.get(name)?;
        self.bodies.get_mut(key)
    }

    /// Look up the key registered under a name
    pub fn key_of(&self, name: &str) -> Option<BodyKey> {
        self.names.get(name).copied()
    }

    /// Look up the name of a member
    pub fn name_of(&self, key: BodyKey) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Member names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().filter_map(|&key| self.name_of(key))
    }

    /// Iterate over members as `(name, body)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Body)> + '_ {
        self.members.iter().filter_map(|&key| {
            let name = self.labels.get(key)?;
            let body = self.bodies.get(key)?;
            Some((name.as_str(), body))
        })
    }

    /// Number of simulated bodies
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when no body is in the simulation
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Total simulation time advanced so far
    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    /// Number of substeps taken by the last call to [`World::step`]
    pub fn last_substep_count(&self) -> usize {
        self.last_substeps
    }

    /// The substep planner for the current configuration
    pub fn substepper(&self) -> Substepper {
        Substepper::from_config(&self.config)
    }

    /// Advance the simulation by a wall-clock frame delta
    ///
    /// The delta is clamped and subdivided (see [`Substepper`]); each substep
    /// runs a full accumulate-then-integrate cycle.
    pub fn step(&mut self, frame_dt: f64) {
        let plan = self.substepper().plan(frame_dt);
        log::debug!(
            "Stepping {} bodies: frame {:.4}s -> {} substeps",
            self.members.len(),
            frame_dt,
            plan.len()
        );
        for &dt in &plan {
            self.substep(dt);
        }
        self.last_substeps = plan.len();
    }

    /// Run one integration substep of `dt` simulation time units
    ///
    /// Phase 1 computes every force from the pre-step positions; phase 2
    /// moves every body.
    pub fn substep(&mut self, dt: f64) {
        let g = self.config.effective_g();

        // Phase 1: Accumulate forces from the unchanged position set
        accumulate_forces(&mut self.bodies, &self.members, g);

        // Phase 2: Integrate every body
        integrate_all(&mut self.bodies, &self.members, dt);

        self.simulated_time += dt;
    }

    /// Sum of member momenta
    pub fn total_momentum(&self) -> Vec2 {
        self.iter().map(|(_, body)| body.momentum()).sum()
    }

    /// Sum of member kinetic energies
    pub fn kinetic_energy(&self) -> f64 {
        self.iter().map(|(_, body)| body.kinetic_energy()).sum()
    }

    /// Gravitational potential energy over all pairs
    pub fn potential_energy(&self) -> f64 {
        let g = self.config.effective_g();
        let bodies: Vec<&Body> = self.iter().map(|(_, body)| body).collect();
        let mut energy = 0.0;
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let r = bodies[i].position.distance(bodies[j].position);
                energy -= g * bodies[i].mass * bodies[j].mass / r;
            }
        }
        energy
    }

    /// Mass-weighted mean position, or `None` for an empty world
    pub fn center_of_mass(&self) -> Option<Vec2> {
        let total_mass: f64 = self.iter().map(|(_, body)| body.mass).sum();
        if self.is_empty() || total_mass <= 0.0 {
            return None;
        }
        let weighted: Vec2 = self.iter().map(|(_, body)| body.position * body.mass).sum();
        Some(weighted / total_mass)
    }

    /// True when every member's position is finite
    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, body)| body.position.is_finite())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_world() -> World {
        World::with_config(PhysicsConfig::new(1.0))
    }

    #[test]
    fn test_create_define_add() {
        let mut world = unit_world();
        let key = world.create_body();
        assert!(world.is_empty());

        world
            .define_body(key, &BodyDef::new(Vec2::new(1.0, 2.0), 2.0))
            .unwrap();
        world.add_to_world("moon", key).unwrap();

        assert_eq!(world.len(), 1);
        assert_eq!(world.key_of("moon"), Some(key));
        assert_eq!(world.name_of(key), Some("moon"));
        let body = world.get("moon").expect("Body should exist");
        assert_eq!(body.position, Vec2::new(1.0, 2.0));
        assert_eq!(body.mass, 8.0);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut world = unit_world();
        world.spawn("a", &BodyDef::new(Vec2::ZERO, 1.0)).unwrap();
        let result = world.spawn("a", &BodyDef::new(Vec2::X, 1.0));
        assert_eq!(result, Err(PhysicsError::DuplicateName("a".to_string())));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_body_added_twice_rejected() {
        let mut world = unit_world();
        let key = world.spawn("a", &BodyDef::new(Vec2::ZERO, 1.0)).unwrap();
        assert_eq!(
            world.add_to_world("b", key),
            Err(PhysicsError::AlreadyInWorld("a".to_string()))
        );
    }

    #[test]
    fn test_stale_key_rejected() {
        let mut world = unit_world();
        let key = world.spawn("a", &BodyDef::new(Vec2::ZERO, 1.0)).unwrap();
        assert!(world.remove("a").is_some());
        assert!(world.get_body(key).is_none());
        assert_eq!(
            world.define_body(key, &BodyDef::new(Vec2::ZERO, 1.0)),
            Err(PhysicsError::UnknownBody)
        );
        assert_eq!(world.add_to_world("a", key), Err(PhysicsError::UnknownBody));
    }

    #[test]
    fn test_unnamed_bodies_do_not_attract() {
        let mut world = unit_world();
        world.spawn("a", &BodyDef::new(Vec2::ZERO, 1.0)).unwrap();
        let stray = world.create_body();
        world
            .define_body(stray, &BodyDef::new(Vec2::new(1.0, 0.0), 5.0))
            .unwrap();

        world.substep(0.1);
        assert_eq!(world.get("a").unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn test_names_in_insertion_order() {
        let mut world = unit_world();
        for (i, name) in ["sun", "mercury", "venus"].iter().enumerate() {
            world
                .spawn(*name, &BodyDef::new(Vec2::new(i as f64 * 10.0, 0.0), 1.0))
                .unwrap();
        }
        let names: Vec<&str> = world.names().collect();
        assert_eq!(names, vec!["sun", "mercury", "venus"]);
    }

    #[test]
    fn test_step_counts_substeps_and_time() {
        let mut world = World::with_config(PhysicsConfig::new(1.0).with_stepping(0.25, 1.0));
        world.spawn("a", &BodyDef::new(Vec2::ZERO, 1.0)).unwrap();

        world.step(0.5);
        assert_eq!(world.last_substep_count(), 2);
        assert!((world.simulated_time() - 0.5).abs() < 1e-12);

        world.step(5.0);
        assert_eq!(world.last_substep_count(), 4);
        assert!((world.simulated_time() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_non_positive_step_is_noop() {
        let mut world = unit_world();
        world
            .spawn("a", &BodyDef::new(Vec2::ZERO, 1.0).with_velocity(Vec2::X))
            .unwrap();
        world.step(0.0);
        world.step(-1.0);
        assert_eq!(world.get("a").unwrap().position, Vec2::ZERO);
        assert_eq!(world.simulated_time(), 0.0);
    }

    #[test]
    fn test_center_of_mass() {
        let mut world = unit_world();
        assert!(world.center_of_mass().is_none());
        world
            .spawn("a", &BodyDef::new(Vec2::ZERO, 1.0).with_mass(3.0))
            .unwrap();
        world
            .spawn("b", &BodyDef::new(Vec2::new(4.0, 0.0), 1.0).with_mass(1.0))
            .unwrap();
        assert_eq!(world.center_of_mass(), Some(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_potential_energy() {
        let mut world = unit_world();
        world
            .spawn("a", &BodyDef::new(Vec2::ZERO, 1.0).with_mass(2.0))
            .unwrap();
        world
            .spawn("b", &BodyDef::new(Vec2::new(2.0, 0.0), 1.0).with_mass(3.0))
            .unwrap();
        assert!((world.potential_energy() + 3.0).abs() < 1e-12);
    }
}
