//! Physics error types
//!
//! Errors only arise while building a world. Stepping never fails: invalid
//! durations are clamped and degenerate geometry propagates as non-finite
//! positions.

use std::fmt;

/// Error type for world construction
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// The body key does not refer to a live body
    UnknownBody,
    /// No body is registered under this name
    UnknownName(String),
    /// A body is already registered under this name
    DuplicateName(String),
    /// The body key is already registered under another name
    AlreadyInWorld(String),
    /// Radius must be finite and non-negative
    InvalidRadius(f64),
    /// Mass must be finite and strictly positive
    InvalidMass(f64),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::UnknownBody => write!(f, "Body key is stale or was never created"),
            PhysicsError::UnknownName(name) => write!(f, "No body named '{}'", name),
            PhysicsError::DuplicateName(name) => write!(f, "A body named '{}' already exists", name),
            PhysicsError::AlreadyInWorld(name) => {
                write!(f, "Body is already in the world as '{}'", name)
            }
            PhysicsError::InvalidRadius(r) => write!(f, "Invalid body radius: {}", r),
            PhysicsError::InvalidMass(m) => write!(f, "Invalid body mass: {}", m),
        }
    }
}

impl std::error::Error for PhysicsError {}
