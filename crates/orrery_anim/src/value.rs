//! Animatable values

use orrery_math::Vec2;
use serde::{Deserialize, Serialize};

/// A value a tween can interpolate
///
/// Easing dispatches on the variant: scalar functions apply directly to
/// `Scalar` and componentwise to `Vector`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AnimValue {
    /// A single number (zoom, opacity, angle)
    Scalar(f64),
    /// A 2D point or offset (view center)
    Vector(Vec2),
}

impl AnimValue {
    /// The scalar payload, if this is a scalar
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            AnimValue::Scalar(v) => Some(*v),
            AnimValue::Vector(_) => None,
        }
    }

    /// The vector payload, if this is a vector
    pub fn as_vector(&self) -> Option<Vec2> {
        match self {
            AnimValue::Scalar(_) => None,
            AnimValue::Vector(v) => Some(*v),
        }
    }

    /// True when both values carry the same variant
    pub fn same_kind(&self, other: &AnimValue) -> bool {
        matches!(
            (self, other),
            (AnimValue::Scalar(_), AnimValue::Scalar(_)) | (AnimValue::Vector(_), AnimValue::Vector(_))
        )
    }
}

impl From<f64> for AnimValue {
    fn from(v: f64) -> Self {
        AnimValue::Scalar(v)
    }
}

impl From<Vec2> for AnimValue {
    fn from(v: Vec2) -> Self {
        AnimValue::Vector(v)
    }
}
