//! Frame driver
//!
//! Manages one frame of the application:
//! - Delta time calculation
//! - View tween advancement
//! - Gravity substepping
//! - View center synchronization

use std::time::Instant;

use orrery_anim::Animator;
use orrery_physics::World;

use super::view::ViewState;

/// Result of a simulation update
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Real seconds this frame covered
    pub dt: f64,
    /// Substeps the world integrated
    pub substeps: usize,
    /// Total simulated time after the frame
    pub simulated_time: f64,
}

/// Drives the world and the view once per frame
///
/// Each frame advances the animator exactly once with the frame's real
/// delta, then lets the world substep the same delta.
pub struct SimulationSystem {
    last_frame: Instant,
    frames: u64,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frames: 0,
        }
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Run one frame using the wall-clock delta since the previous one
    pub fn update(&mut self, world: &mut World, animator: &mut Animator<ViewState>) -> FrameStats {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;
        // The substepper clamps long frames, so no cap here
        self.update_with_dt(world, animator, dt)
    }

    /// Run one frame with an explicit delta
    pub fn update_with_dt(
        &mut self,
        world: &mut World,
        animator: &mut Animator<ViewState>,
        dt: f64,
    ) -> FrameStats {
        // 1. Advance view transitions
        animator.tick(dt);

        // 2. Step gravity
        world.step(dt);

        // 3. Keep the authoritative center on the tracked body; a running
        //    center tween picks up the new target through its supplier
        animator.owner().borrow_mut().follow(world);

        self.frames += 1;
        let stats = FrameStats {
            dt,
            substeps: world.last_substep_count(),
            simulated_time: world.simulated_time(),
        };
        log::trace!("Frame {}: {:?}", self.frames, stats);
        stats
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}
