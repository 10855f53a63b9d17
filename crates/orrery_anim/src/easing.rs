//! Easing functions and the per-property easing registry
//!
//! An easing maps `(start, end, t)` to a value, with `t` the normalized
//! progress in `[0, 1]`. Presets shape `t` and then interpolate linearly;
//! custom functions are free-form. Both are scalar and are lifted to
//! vectors componentwise.

use crate::value::AnimValue;
use orrery_math::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// A scalar easing function `(start, end, t) -> value`
pub type EasingFn = Rc<dyn Fn(f64, f64, f64) -> f64>;

/// Named easing presets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineInOut,
    ExpoOut,
}

impl Easing {
    /// Every preset, in declaration order
    pub const ALL: [Easing; 9] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::SineInOut,
        Easing::ExpoOut,
    ];

    /// Reshape normalized progress; `shape(0) == 0` and `shape(1) == 1`
    pub fn shape(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
        }
    }

    /// Interpolate between two scalars
    pub fn ease(self, start: f64, end: f64, t: f64) -> f64 {
        start + (end - start) * self.shape(t)
    }

    /// Shared function form of this preset
    pub fn to_fn(self) -> EasingFn {
        Rc::new(move |start, end, t| self.ease(start, end, t))
    }

    /// The snake_case preset name
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "quad_in",
            Easing::QuadOut => "quad_out",
            Easing::QuadInOut => "quad_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
            Easing::SineInOut => "sine_in_out",
            Easing::ExpoOut => "expo_out",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized preset name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEasing(pub String);

impl fmt::Display for UnknownEasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown easing preset: {}", self.0)
    }
}

impl std::error::Error for UnknownEasing {}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::ALL
            .iter()
            .copied()
            .find(|e| e.name() == s)
            .ok_or_else(|| UnknownEasing(s.to_string()))
    }
}

/// What to register for a property: a preset or a custom function
#[derive(Clone)]
pub enum EasingSpec {
    Preset(Easing),
    Custom(EasingFn),
}

impl EasingSpec {
    /// Wrap a custom `(start, end, t)` function
    pub fn custom(f: impl Fn(f64, f64, f64) -> f64 + 'static) -> Self {
        EasingSpec::Custom(Rc::new(f))
    }

    /// Resolve to a callable function
    pub fn into_fn(self) -> EasingFn {
        match self {
            EasingSpec::Preset(preset) => preset.to_fn(),
            EasingSpec::Custom(f) => f,
        }
    }
}

impl From<Easing> for EasingSpec {
    fn from(preset: Easing) -> Self {
        EasingSpec::Preset(preset)
    }
}

impl From<EasingFn> for EasingSpec {
    fn from(f: EasingFn) -> Self {
        EasingSpec::Custom(f)
    }
}

impl fmt::Debug for EasingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EasingSpec::Preset(preset) => write!(f, "Preset({})", preset),
            EasingSpec::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Apply a scalar easing to an animatable value
///
/// Vectors are eased per component. A start/end pair of different kinds
/// cannot be blended and resolves to `end`.
pub fn interpolate(f: &EasingFn, start: AnimValue, end: AnimValue, t: f64) -> AnimValue {
    match (start, end) {
        (AnimValue::Scalar(a), AnimValue::Scalar(b)) => AnimValue::Scalar(f(a, b, t)),
        (AnimValue::Vector(a), AnimValue::Vector(b)) => {
            AnimValue::Vector(Vec2::new(f(a.x, b.x, t), f(a.y, b.y, t)))
        }
        (_, end) => end,
    }
}

/// Easing functions keyed by property name; linear by default
pub struct EasingRegistry {
    default: EasingFn,
    by_name: HashMap<String, EasingFn>,
}

impl EasingRegistry {
    /// Create a registry where every property eases linearly
    pub fn new() -> Self {
        Self::with_default(Easing::Linear)
    }

    /// Create a registry with a different fallback
    pub fn with_default(spec: impl Into<EasingSpec>) -> Self {
        Self {
            default: spec.into().into_fn(),
            by_name: HashMap::new(),
        }
    }

    /// Register the easing for a property
    pub fn set(&mut self, name: impl Into<String>, spec: impl Into<EasingSpec>) {
        self.by_name.insert(name.into(), spec.into().into_fn());
    }

    /// Remove a property's easing so it falls back to the default
    pub fn clear(&mut self, name: &str) -> bool {
        self.by_name.remove(name).is_some()
    }

    /// The easing used for a property
    pub fn get(&self, name: &str) -> EasingFn {
        self.by_name
            .get(name)
            .cloned()
            .unwrap_or_else(|| Rc::clone(&self.default))
    }

    /// True when the property has its own easing
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Ease a value with the property's function
    pub fn interpolate(&self, name: &str, start: AnimValue, end: AnimValue, t: f64) -> AnimValue {
        interpolate(&self.get(name), start, end, t)
    }
}

impl Default for EasingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
