//! Variable-step position Verlet
//!
//! ```text
//! accel  = force / mass
//! newPos = pos + (dt / prevDt) · (pos - prevPos) + dt² · accel
//! ```
//!
//! The `dt / prevDt` ratio lets consecutive steps differ in length. No
//! velocity is stored; the scheme is self-starting once `prevPos` exists.

use crate::body::{clamp_dt, clamp_mass, Body, BodyKey};
use slotmap::SlotMap;

/// Advance one body by `dt` using its accumulated force
///
/// A `dt` below [`crate::MIN_DT`] (or non-finite) is clamped to it, and
/// the mass goes through [`clamp_mass`], so the step never divides by zero.
pub fn verlet_step(body: &mut Body, dt: f64) {
    let clamped = clamp_dt(dt);
    if clamped != dt {
        log::warn!("Invalid integration step {}, clamping to {:e}", dt, clamped);
    }
    let dt = clamped;

    let accel = body.force() / clamp_mass(body.mass);
    let drift = (body.position - body.prev_position()) * (dt / body.prev_dt());
    let new_position = body.position + drift + accel * (dt * dt);
    body.advance(new_position, dt);
}

/// Advance every member by `dt`
///
/// Forces must already be accumulated for the same position set.
pub fn integrate_all(bodies: &mut SlotMap<BodyKey, Body>, members: &[BodyKey], dt: f64) {
    for &key in members {
        if let Some(body) = bodies.get_mut(key) {
            verlet_step(body, dt);
        }
    }
}
