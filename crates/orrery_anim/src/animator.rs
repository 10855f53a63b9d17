//! Property animator
//!
//! An [`Animator`] is bound to one owner object and keeps at most one
//! [`TweenTask`] per property name. A committing call to
//! [`Animator::animate`] snapshots the value the reader currently sees, lets
//! the commit change the owner's authoritative value, then tweens from the
//! snapshot toward the owner's *live* value. The target is re-read on every
//! read, so a target that keeps moving after the commit is chased.
//!
//! Retargeting a property mid-flight starts the new task from the in-progress
//! value, so the observed value never jumps. The replaced task is dropped
//! without running its completion callback.

use crate::easing::{interpolate, EasingFn, EasingRegistry, EasingSpec};
use crate::value::AnimValue;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// An object whose named properties can be animated
pub trait Animated {
    /// Current authoritative value of a property, `None` if unknown
    fn property(&self, name: &str) -> Option<AnimValue>;

    /// Set a property; returns `false` if the name is unknown or the kind is wrong
    fn set_property(&mut self, name: &str, value: AnimValue) -> bool;
}

/// A plain property bag
impl Animated for HashMap<String, AnimValue> {
    fn property(&self, name: &str) -> Option<AnimValue> {
        self.get(name).copied()
    }

    fn set_property(&mut self, name: &str, value: AnimValue) -> bool {
        self.insert(name.to_string(), value);
        true
    }
}

/// Rounding slack when deciding a tween has run its full duration
const PROGRESS_EPSILON: f64 = 1e-9;

/// Live read of a tween's target
type Supplier = Box<dyn Fn() -> Option<AnimValue>>;

/// One in-flight interpolation
pub struct TweenTask {
    start: AnimValue,
    end: Supplier,
    t: f64,
    speed: f64,
    easing: EasingFn,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl TweenTask {
    /// Value the task started from
    pub fn start(&self) -> AnimValue {
        self.start
    }

    /// Normalized progress; reaches 1 on completion
    pub fn progress(&self) -> f64 {
        self.t
    }

    /// Progress per second (`1 / duration`)
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The target as it is right now
    pub fn target(&self) -> Option<AnimValue> {
        (self.end)()
    }

    /// Interpolated value, computed on read
    ///
    /// If the target has disappeared the start value is held.
    pub fn value(&self) -> AnimValue {
        match (self.end)() {
            Some(end) if self.t >= 1.0 => end,
            Some(end) => interpolate(&self.easing, self.start, end, self.t),
            None => self.start,
        }
    }

    /// Advance progress; returns true once complete
    ///
    /// Progress within [`PROGRESS_EPSILON`] of the end counts as complete,
    /// so summing many small ticks over exactly the duration finishes.
    fn advance(&mut self, dt: f64) -> bool {
        self.t += dt * self.speed;
        if 1.0 - self.t <= PROGRESS_EPSILON {
            self.t = 1.0;
        }
        self.t >= 1.0
    }
}

/// Tweens the properties of one owner
pub struct Animator<O: Animated + 'static> {
    owner: Rc<RefCell<O>>,
    tasks: HashMap<String, TweenTask>,
    easings: EasingRegistry,
    /// Internal property name -> display property it mirrors
    aliases: HashMap<String, String>,
}

impl<O: Animated + 'static> Animator<O> {
    /// Create an animator bound to an owner
    pub fn new(owner: Rc<RefCell<O>>) -> Self {
        Self {
            owner,
            tasks: HashMap::new(),
            easings: EasingRegistry::new(),
            aliases: HashMap::new(),
        }
    }

    /// Create an animator that takes ownership of a fresh owner
    pub fn for_owner(owner: O) -> Self {
        Self::new(Rc::new(RefCell::new(owner)))
    }

    /// The bound owner
    pub fn owner(&self) -> &Rc<RefCell<O>> {
        &self.owner
    }

    /// The owner's authoritative value, following wrapped-input aliases
    pub fn live_value(&self, name: &str) -> Option<AnimValue> {
        resolve(&*self.owner.borrow(), &self.aliases, name)
    }

    /// The value a reader currently sees
    ///
    /// The interpolated value while a task runs, otherwise the live value.
    /// Unknown names simply have no task.
    pub fn observe(&self, name: &str) -> Option<AnimValue> {
        match self.tasks.get(name) {
            Some(task) => Some(task.value()),
            None => self.live_value(name),
        }
    }

    /// Commit a change to the owner and tween the property toward it
    ///
    /// A non-positive or non-finite duration applies the change instantly.
    pub fn animate<F>(&mut self, name: &str, commit: F, duration: f64)
    where
        F: FnOnce(&mut O),
    {
        self.start_task(name, commit, duration, None);
    }

    /// Like [`Animator::animate`], running `on_complete` once the tween
    /// finishes
    ///
    /// The callback is dropped without running if the task is replaced or
    /// cancelled, or if no task is started.
    pub fn animate_then<F, C>(&mut self, name: &str, commit: F, duration: f64, on_complete: C)
    where
        F: FnOnce(&mut O),
        C: FnOnce() + 'static,
    {
        self.start_task(name, commit, duration, Some(Box::new(on_complete)));
    }

    fn start_task<F>(
        &mut self,
        name: &str,
        commit: F,
        duration: f64,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) where
        F: FnOnce(&mut O),
    {
        let value_before = self.observe(name);
        commit(&mut *self.owner.borrow_mut());

        let start = match value_before {
            Some(start) if duration.is_finite() && duration > 0.0 => start,
            _ => {
                if !(duration.is_finite() && duration > 0.0) {
                    log::debug!("Instant change for '{}' (duration {})", name, duration);
                }
                self.tasks.remove(name);
                return;
            }
        };

        let task = TweenTask {
            start,
            end: self.live_supplier(name),
            t: 0.0,
            speed: 1.0 / duration,
            easing: self.easings.get(name),
            on_complete,
        };

        if self.tasks.insert(name.to_string(), task).is_some() {
            log::debug!("Retargeted tween '{}'", name);
        } else {
            log::debug!("Started tween '{}' over {:.3}s", name, duration);
        }
    }

    fn live_supplier(&self, name: &str) -> Supplier {
        let owner = Rc::clone(&self.owner);
        let name = name.to_string();
        let display = self.aliases.get(&name).cloned();
        Box::new(move || {
            let owner = owner.borrow();
            match &display {
                Some(display) => owner.property(display),
                None => owner.property(&name),
            }
        })
    }

    /// Advance every task by `dt` seconds of real time
    ///
    /// Completed tasks are removed and their callbacks run, once each.
    /// Negative or non-finite deltas are ignored.
    pub fn tick(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let finished: Vec<String> = self
            .tasks
            .iter_mut()
            .filter_map(|(name, task)| task.advance(dt).then(|| name.clone()))
            .collect();

        for name in finished {
            if let Some(task) = self.tasks.remove(&name) {
                log::debug!("Tween '{}' complete", name);
                if let Some(on_complete) = task.on_complete {
                    on_complete();
                }
            }
        }
    }

    /// Drop a property's task without running its callback
    pub fn cancel(&mut self, name: &str) -> bool {
        self.tasks.remove(name).is_some()
    }

    /// The easing used for a property
    pub fn easing(&self, name: &str) -> EasingFn {
        self.easings.get(name)
    }

    /// Set the easing for a property; applies to tweens started afterwards
    pub fn set_easing(&mut self, name: impl Into<String>, spec: impl Into<EasingSpec>) {
        self.easings.set(name, spec);
    }

    /// True when the property has an active task
    pub fn is_animating(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Number of active tasks
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// The active task for a property
    pub fn task(&self, name: &str) -> Option<&TweenTask> {
        self.tasks.get(name)
    }

    /// Start value of the active task
    pub fn task_start(&self, name: &str) -> Option<AnimValue> {
        self.tasks.get(name).map(TweenTask::start)
    }

    /// Progress of the active task
    pub fn progress(&self, name: &str) -> Option<f64> {
        self.tasks.get(name).map(TweenTask::progress)
    }

    /// Build a two-way property that writes `display` and animates `internal`
    ///
    /// Reads of `internal` resolve to `display`'s live value, so at rest the
    /// two agree and while a write is settling `internal` eases toward it.
    pub fn wrap_input(&mut self, display: &str, internal: &str, duration: f64) -> WrappedInput {
        self.aliases.insert(internal.to_string(), display.to_string());
        WrappedInput {
            display: display.to_string(),
            internal: internal.to_string(),
            duration,
        }
    }
}

fn resolve<O: Animated>(owner: &O, aliases: &HashMap<String, String>, name: &str) -> Option<AnimValue> {
    match aliases.get(name) {
        Some(display) => owner.property(display),
        None => owner.property(name),
    }
}

/// A property whose writes land immediately while a mirror animates
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedInput {
    display: String,
    internal: String,
    duration: f64,
}

impl WrappedInput {
    /// Name of the authoritative property
    pub fn display_name(&self) -> &str {
        &self.display
    }

    /// Name of the animated mirror
    pub fn internal_name(&self) -> &str {
        &self.internal
    }

    /// Read the authoritative value
    pub fn get<O: Animated + 'static>(&self, animator: &Animator<O>) -> Option<AnimValue> {
        animator.live_value(&self.display)
    }

    /// Write the authoritative value and animate the mirror toward it
    pub fn set<O: Animated + 'static>(&self, animator: &mut Animator<O>, value: impl Into<AnimValue>) {
        let display = self.display.clone();
        let value = value.into();
        animator.animate(
            &self.internal,
            move |owner| {
                if !owner.set_property(&display, value) {
                    log::warn!("Owner rejected write to '{}'", display);
                }
            },
            self.duration,
        );
    }

    /// The mirror's observed value
    pub fn animated<O: Animated + 'static>(&self, animator: &Animator<O>) -> Option<AnimValue> {
        animator.observe(&self.internal)
    }
}
