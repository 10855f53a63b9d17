//! Orrery - N-body gravity simulation
//!
//! Runs a body system headlessly, logging what a viewer would see. Halfway
//! through the run the view switches to another body and zooms in, so the
//! eased transitions show up in the log.

use orrery::config::AppConfig;
use orrery::scene::SystemTemplate;
use orrery::systems::view::{self, CENTER, ZOOM};
use orrery::systems::{SimulationSystem, ViewState};
use orrery_anim::Animator;
use orrery_physics::World;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    world: World,
    animator: Animator<ViewState>,
    simulation: SimulationSystem,
    /// Energy at startup, for drift reporting
    initial_energy: f64,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let template = match &config.system.path {
            Some(path) => {
                log::info!("Loading system from {}", path);
                SystemTemplate::load(path)?
            }
            None => SystemTemplate::solar_default(),
        };

        let world = template.instantiate(config.simulation.to_physics_config())?;
        log::info!(
            "Loaded system '{}' with {} bodies (G_eff = {:e})",
            template.name,
            world.len(),
            world.config.effective_g()
        );

        let mut view = ViewState::new(
            world.center_of_mass().unwrap_or_default(),
            config.view.initial_zoom,
        );
        if let Some(name) = &config.view.track {
            view = view.with_tracked(name.clone());
            if !view.follow(&world) {
                log::warn!("Tracked body '{}' not found", name);
            }
        }

        let mut animator = Animator::for_owner(view);
        animator.set_easing(CENTER, config.view.easing);
        animator.set_easing(ZOOM, config.view.easing);

        let initial_energy = world.kinetic_energy() + world.potential_energy();

        Ok(Self {
            config,
            world,
            animator,
            simulation: SimulationSystem::new(),
            initial_energy,
        })
    }

    /// Body to switch to halfway: the last one that is not already tracked
    fn next_target(&self) -> Option<String> {
        let owner = self.animator.owner().borrow();
        let current = owner.tracked();
        let target = self
            .world
            .names()
            .filter(|name| Some(*name) != current)
            .last()
            .map(str::to_string);
        target
    }

    fn run(&mut self) {
        let frames = self.config.debug.frames;
        let midpoint = frames / 2;
        let report_every = (frames / 10).max(1);

        for frame in 0..frames {
            if frame == midpoint {
                if let Some(target) = self.next_target() {
                    view::track_body(
                        &mut self.animator,
                        &self.world,
                        &target,
                        self.config.view.recenter_seconds,
                    );
                    view::zoom_by(&mut self.animator, 2.0, self.config.view.zoom_seconds);
                }
            }

            let stats = match self.config.debug.frame_dt {
                Some(dt) => self
                    .simulation
                    .update_with_dt(&mut self.world, &mut self.animator, dt),
                None => self.simulation.update(&mut self.world, &mut self.animator),
            };

            if frame % report_every == 0 || frame + 1 == frames {
                let (center, zoom) = view::observed(&self.animator);
                log::info!(
                    "Frame {}: t = {:.1}, {} substeps, view ({:.2}, {:.2}) x{:.2}",
                    frame,
                    stats.simulated_time,
                    stats.substeps,
                    center.x,
                    center.y,
                    zoom
                );
            }
        }

        if !self.world.is_finite() {
            log::error!("Simulation diverged: a body position is no longer finite");
            return;
        }

        for (name, body) in self.world.iter() {
            log::debug!(
                "{}: position ({:.2}, {:.2}) velocity ({:.3e}, {:.3e})",
                name,
                body.position.x,
                body.position.y,
                body.velocity().x,
                body.velocity().y
            );
        }

        let energy = self.world.kinetic_energy() + self.world.potential_energy();
        let drift = if self.initial_energy != 0.0 {
            ((energy - self.initial_energy) / self.initial_energy).abs()
        } else {
            0.0
        };
        log::info!(
            "Finished {} frames, simulated {:.1} time units, relative energy drift {:.2e}",
            self.simulation.frame_count(),
            self.world.simulated_time(),
            drift
        );
    }
}

fn main() {
    // Load configuration before logging so the configured level applies
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Initialize logging; RUST_LOG still wins when set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting Orrery");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let mut app = App::new(config).unwrap_or_else(|e| {
        log::error!("Failed to set up simulation: {}", e);
        std::process::exit(1);
    });
    app.run();
}
