//! Pairwise Newtonian gravity
//!
//! `F(b) = Σ G · m(b) · m(o) / |d|³ · d` with `d = pos(o) - pos(b)`, summed over
//! every other member of the world. O(n²) per substep.

use crate::body::{Body, BodyKey};
use orrery_math::Vec2;
use slotmap::SlotMap;

/// Force exerted on `on` by `from`
///
/// Co-located bodies produce a zero denominator and a NaN force. That is a
/// caller error and is left to poison the simulation.
#[inline]
pub fn pairwise_force(on: &Body, from: &Body, g: f64) -> Vec2 {
    let d = from.position - on.position;
    let dist_sq = d.magnitude_squared();
    let dist = dist_sq.sqrt();
    d * (g * on.mass * from.mass / (dist_sq * dist))
}

/// Total force on `focal` from every other member
///
/// The self-term is skipped by key, not by distance.
pub fn gravitational_force(
    focal: BodyKey,
    bodies: &SlotMap<BodyKey, Body>,
    members: &[BodyKey],
    g: f64,
) -> Vec2 {
    let Some(on) = bodies.get(focal) else {
        return Vec2::ZERO;
    };

    members
        .iter()
        .filter(|&&key| key != focal)
        .filter_map(|&key| bodies.get(key))
        .map(|from| pairwise_force(on, from, g))
        .sum()
}

/// Compute and store the force on every member from the current positions
///
/// All forces are computed before any is written, so no body sees a
/// half-updated position set.
pub fn accumulate_forces(bodies: &mut SlotMap<BodyKey, Body>, members: &[BodyKey], g: f64) {
    let forces: Vec<Vec2> = members
        .iter()
        .map(|&key| gravitational_force(key, bodies, members, g))
        .collect();

    for (&key, force) in members.iter().zip(forces) {
        if let Some(body) = bodies.get_mut(key) {
            log::trace!("force on {:?}: ({:e}, {:e})", key, force.x, force.y);
            body.set_force(force);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_bodies(a: Vec2, b: Vec2) -> (SlotMap<BodyKey, Body>, Vec<BodyKey>) {
        let mut bodies = SlotMap::with_key();
        let ka = bodies.insert(Body::new(a, 1.0));
        let kb = bodies.insert(Body::new(b, 1.0));
        (bodies, vec![ka, kb])
    }

    #[test]
    fn test_pairwise_force_unit_case() {
        let a = Body::new(Vec2::ZERO, 1.0);
        let b = Body::new(Vec2::new(1.0, 0.0), 1.0);
        assert_eq!(pairwise_force(&a, &b, 1.0), Vec2::new(1.0, 0.0));
        assert_eq!(pairwise_force(&b, &a, 1.0), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_inverse_square_falloff() {
        let a = Body::new(Vec2::ZERO, 1.0);
        let near = Body::new(Vec2::new(0.0, 2.0), 1.0);
        let far = Body::new(Vec2::new(0.0, 4.0), 1.0);
        let f_near = pairwise_force(&a, &near, 1.0).magnitude();
        let f_far = pairwise_force(&a, &far, 1.0).magnitude();
        assert!((f_near / f_far - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_force_scales_with_g_and_masses() {
        let a = Body::new(Vec2::ZERO, 1.0).with_mass(2.0);
        let b = Body::new(Vec2::new(1.0, 0.0), 1.0).with_mass(3.0);
        assert_eq!(pairwise_force(&a, &b, 0.5), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_single_member_has_no_force() {
        let mut bodies = SlotMap::with_key();
        let key = bodies.insert(Body::new(Vec2::new(3.0, 3.0), 1.0));
        assert_eq!(gravitational_force(key, &bodies, &[key], 1.0), Vec2::ZERO);
    }

    #[test]
    fn test_non_members_are_ignored() {
        let (mut bodies, members) = two_bodies(Vec2::ZERO, Vec2::new(1.0, 0.0));
        bodies.insert(Body::new(Vec2::new(-1.0, 0.0), 10.0));
        let f = gravitational_force(members[0], &bodies, &members, 1.0);
        assert_eq!(f, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_accumulate_writes_every_member() {
        let (mut bodies, members) = two_bodies(Vec2::ZERO, Vec2::new(2.0, 0.0));
        accumulate_forces(&mut bodies, &members, 4.0);
        assert_eq!(bodies[members[0]].force(), Vec2::new(1.0, 0.0));
        assert_eq!(bodies[members[1]].force(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_co_located_bodies_poison_force() {
        let (mut bodies, members) = two_bodies(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0));
        accumulate_forces(&mut bodies, &members, 1.0);
        assert!(!bodies[members[0]].force().is_finite());
    }
}
