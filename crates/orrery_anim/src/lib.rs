//! Property tweening for orrery
//!
//! Smooths discrete changes to an owner's properties (re-centering a view,
//! switching the tracked body) into continuous transitions:
//!
//! - [`AnimValue`] - Scalar or 2D vector value that can be animated
//! - [`Easing`] - Named easing presets
//! - [`EasingRegistry`] - Per-property easing functions, linear by default
//! - [`Animator`] - Per-owner registry of in-flight tweens
//! - [`WrappedInput`] - Two-way property with an animated mirror

mod animator;
mod easing;
mod value;

pub use animator::{Animated, Animator, TweenTask, WrappedInput};
pub use easing::{interpolate, Easing, EasingFn, EasingRegistry, EasingSpec, UnknownEasing};
pub use value::AnimValue;
