//! View state and tracking
//!
//! The view is an animated owner: `center` and `zoom` hold the
//! authoritative values and the animator eases what readers observe
//! toward them.

use orrery_anim::{AnimValue, Animated, Animator};
use orrery_math::Vec2;
use orrery_physics::World;

/// Animated property holding the view center
pub const CENTER: &str = "center";
/// Animated property holding the zoom factor
pub const ZOOM: &str = "zoom";

/// What the viewer is looking at
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    /// Authoritative view center
    pub center: Vec2,
    /// Authoritative zoom factor
    pub zoom: f64,
    tracked: Option<String>,
}

impl ViewState {
    /// Create an untracked view
    pub fn new(center: Vec2, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            tracked: None,
        }
    }

    /// Follow a body by name
    pub fn with_tracked(mut self, name: impl Into<String>) -> Self {
        self.tracked = Some(name.into());
        self
    }

    /// Name of the followed body
    pub fn tracked(&self) -> Option<&str> {
        self.tracked.as_deref()
    }

    /// Copy the tracked body's position into `center`
    ///
    /// Returns false when nothing is tracked or the body is gone; the
    /// center is left where it was.
    pub fn follow(&mut self, world: &World) -> bool {
        let Some(body) = self.tracked.as_deref().and_then(|name| world.get(name)) else {
            return false;
        };
        self.center = body.position;
        true
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0)
    }
}

impl Animated for ViewState {
    fn property(&self, name: &str) -> Option<AnimValue> {
        match name {
            CENTER => Some(AnimValue::Vector(self.center)),
            ZOOM => Some(AnimValue::Scalar(self.zoom)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: AnimValue) -> bool {
        match (name, value) {
            (CENTER, AnimValue::Vector(v)) => self.center = v,
            (ZOOM, AnimValue::Scalar(v)) => self.zoom = v,
            _ => return false,
        }
        true
    }
}

/// Switch the tracked body and glide the view to it
///
/// The center tween keeps chasing the body while it moves. Unknown names
/// leave the view untouched.
pub fn track_body(
    animator: &mut Animator<ViewState>,
    world: &World,
    name: &str,
    duration: f64,
) -> bool {
    let Some(body) = world.get(name) else {
        log::warn!("Cannot track unknown body '{}'", name);
        return false;
    };
    let position = body.position;

    animator.animate(
        CENTER,
        |view| {
            view.tracked = Some(name.to_string());
            view.center = position;
        },
        duration,
    );
    log::info!("Tracking '{}'", name);
    true
}

/// Multiply the zoom factor, easing toward the result
pub fn zoom_by(animator: &mut Animator<ViewState>, factor: f64, duration: f64) {
    if !factor.is_finite() || factor <= 0.0 {
        log::warn!("Ignoring zoom factor {}", factor);
        return;
    }
    animator.animate(ZOOM, |view| view.zoom *= factor, duration);
}

/// The center and zoom a renderer would use this frame
pub fn observed(animator: &Animator<ViewState>) -> (Vec2, f64) {
    let view = animator.owner().borrow();
    let center = animator
        .observe(CENTER)
        .and_then(|v| v.as_vector())
        .unwrap_or(view.center);
    let zoom = animator
        .observe(ZOOM)
        .and_then(|v| v.as_scalar())
        .unwrap_or(view.zoom);
    (center, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_anim::Easing;
    use orrery_physics::{BodyDef, PhysicsConfig};

    fn world() -> World {
        let mut world = World::with_config(PhysicsConfig::new(0.0));
        world.spawn("a", &BodyDef::new(Vec2::new(0.0, 0.0), 1.0)).unwrap();
        world.spawn("b", &BodyDef::new(Vec2::new(10.0, 0.0), 1.0)).unwrap();
        world
    }

    #[test]
    fn test_properties_round_trip_through_animated() {
        let mut view = ViewState::default();
        assert!(view.set_property(ZOOM, AnimValue::Scalar(3.0)));
        assert!(!view.set_property(ZOOM, AnimValue::Vector(Vec2::X)));
        assert!(!view.set_property("rotation", AnimValue::Scalar(1.0)));
        assert_eq!(view.property(ZOOM), Some(AnimValue::Scalar(3.0)));
        assert_eq!(view.property(CENTER), Some(AnimValue::Vector(Vec2::ZERO)));
    }

    #[test]
    fn test_follow_tracked_body() {
        let world = world();
        let mut view = ViewState::default().with_tracked("b");
        assert!(view.follow(&world));
        assert_eq!(view.center, Vec2::new(10.0, 0.0));

        let mut untracked = ViewState::default();
        assert!(!untracked.follow(&world));
    }

    #[test]
    fn test_track_body_glides() {
        let world = world();
        let mut animator = Animator::for_owner(ViewState::default().with_tracked("a"));
        animator.set_easing(CENTER, Easing::Linear);

        assert!(track_body(&mut animator, &world, "b", 1.0));
        assert_eq!(animator.owner().borrow().tracked(), Some("b"));
        assert_eq!(observed(&animator).0, Vec2::ZERO);

        animator.tick(0.25);
        assert_eq!(observed(&animator).0, Vec2::new(2.5, 0.0));
    }

    #[test]
    fn test_track_unknown_body_is_ignored() {
        let world = world();
        let mut animator = Animator::for_owner(ViewState::default().with_tracked("a"));
        assert!(!track_body(&mut animator, &world, "ghost", 1.0));
        assert_eq!(animator.owner().borrow().tracked(), Some("a"));
        assert!(!animator.is_animating(CENTER));
    }

    #[test]
    fn test_zoom_by() {
        let mut animator = Animator::for_owner(ViewState::default());
        zoom_by(&mut animator, 4.0, 1.0);
        assert_eq!(animator.owner().borrow().zoom, 4.0);
        animator.tick(0.5);
        assert_eq!(observed(&animator).1, 2.5);

        zoom_by(&mut animator, -1.0, 1.0);
        assert_eq!(animator.owner().borrow().zoom, 4.0);
    }
}
