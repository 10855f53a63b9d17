//! Frame delta to substep conversion
//!
//! A frame delta is clamped, converted to simulation time, then split into
//! fixed substeps plus one partial remainder. This bounds the truncation
//! error of a single step regardless of frame rate, and bounds the catch-up
//! cost after a stall.

use crate::config::{PhysicsConfig, DEFAULT_SUBSTEP};

/// Remainders smaller than this fraction of a substep are dropped
const REMAINDER_EPSILON: f64 = 1e-9;

/// Most substeps a single frame may plan
pub const MAX_SUBSTEPS: usize = 10_000;

/// Plans integration substeps for a wall-clock frame delta
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Substepper {
    /// Longest frame delta that is simulated (wall-clock seconds)
    pub max_frame_dt: f64,
    /// Substep length (wall-clock seconds)
    pub substep: f64,
    /// Simulation time units per wall-clock second
    pub time_scale: f64,
}

impl Substepper {
    /// Create a substepper from explicit values
    pub fn new(max_frame_dt: f64, substep: f64, time_scale: f64) -> Self {
        Self {
            max_frame_dt,
            substep,
            time_scale,
        }
    }

    /// Create a substepper from the world configuration
    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self::new(config.max_frame_dt, config.substep, config.time_scale)
    }

    /// Simulation-time length of one whole substep
    ///
    /// A substep that is not positive and finite is replaced by
    /// [`DEFAULT_SUBSTEP`].
    pub fn substep_duration(&self) -> f64 {
        let substep = if self.substep.is_finite() && self.substep > 0.0 {
            self.substep
        } else {
            log::warn!("Invalid substep {}, using {}", self.substep, DEFAULT_SUBSTEP);
            DEFAULT_SUBSTEP
        };
        substep * self.time_scale
    }

    /// Simulation time covered by a frame delta after clamping
    pub fn simulated_duration(&self, frame_dt: f64) -> f64 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0.0;
        }
        let clamped = frame_dt.min(self.max_frame_dt);
        if clamped < frame_dt {
            log::debug!("Frame delta {:.3}s clamped to {:.3}s", frame_dt, clamped);
        }
        clamped * self.time_scale
    }

    /// Step durations (simulation time) covering one frame delta
    ///
    /// Non-positive and non-finite deltas plan nothing. At most
    /// [`MAX_SUBSTEPS`] steps are planned; beyond that the frame is split
    /// into that many equal, longer steps.
    pub fn plan(&self, frame_dt: f64) -> Vec<f64> {
        let total = self.simulated_duration(frame_dt);
        if total <= 0.0 || !total.is_finite() {
            return Vec::new();
        }

        let h = self.substep_duration();
        if !h.is_finite() || h <= 0.0 {
            // Only reachable through a broken time scale
            log::warn!("Cannot subdivide with substep duration {}", h);
            return Vec::new();
        }

        let whole = (total / h + REMAINDER_EPSILON).floor();
        if whole >= MAX_SUBSTEPS as f64 {
            log::warn!(
                "Frame needs {:.0} substeps, capping at {}",
                whole,
                MAX_SUBSTEPS
            );
            return vec![total / MAX_SUBSTEPS as f64; MAX_SUBSTEPS];
        }

        let whole = whole as usize;
        let mut steps = vec![h; whole];
        let remainder = total - whole as f64 * h;
        if remainder > h * REMAINDER_EPSILON {
            steps.push(remainder);
        }
        steps
    }
}

impl Default for Substepper {
    fn default() -> Self {
        Self::from_config(&PhysicsConfig::default())
    }
}
