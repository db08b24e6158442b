use std::cell::RefCell;
use std::rc::Rc;
use web_time::{Duration, Instant};

pub(crate) fn now() -> Instant {
    CLOCK.with(|c| c.borrow().as_ref().map(|c| c.now()))
        .unwrap_or_else(Instant::now)
}

#[derive(Clone, Copy, Debug)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            delay: Duration::ZERO,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }

    pub fn fast() -> Self {
        Self {
            duration: Duration::from_millis(150),
            easing: Easing::EaseOut,
            delay: Duration::ZERO,
        }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for crate::Color {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        crate::Color(
            (self.0 as f32 + (other.0 as f32 - self.0 as f32) * t) as u8,
            (self.1 as f32 + (other.1 as f32 - self.1 as f32) * t) as u8,
            (self.2 as f32 + (other.2 as f32 - self.2 as f32) * t) as u8,
            (self.3 as f32 + (other.3 as f32 - self.3 as f32) * t) as u8,
        )
    }
}

// Animation clock. The runtime is single-threaded, so the clock is
// per-thread and replaceable; each test thread drives its own.
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

thread_local! {
    static CLOCK: RefCell<Option<Rc<dyn Clock>>> = const { RefCell::new(None) };
}

/// Install the animation clock for this thread. Platform sets this to
/// SystemClock; tests install a `TestClock`.
pub fn set_clock(clock: Rc<dyn Clock>) {
    CLOCK.with(|c| *c.borrow_mut() = Some(clock));
}

/// A test clock you can drive deterministically; advance it between frames
/// to step transitions.
#[derive(Clone, Default)]
pub struct TestClock(Rc<std::cell::Cell<Option<Instant>>>);

impl TestClock {
    /// Creates the clock and installs it for the current thread.
    pub fn install() -> Self {
        let clock = Self(Rc::new(std::cell::Cell::new(Some(Instant::now()))));
        set_clock(Rc::new(clock.clone()));
        clock
    }

    pub fn advance(&self, by: Duration) {
        let t = self.0.get().unwrap_or_else(Instant::now);
        self.0.set(Some(t + by));
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.0.get().unwrap_or_else(Instant::now)
    }
}

/// Animated value that transitions smoothly toward a target.
pub struct AnimatedValue<T: Interpolate + Clone> {
    current: T,
    target: T,
    start: T,
    spec: AnimationSpec,
    start_time: Option<Instant>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            spec,
            start_time: None,
        }
    }

    /// Retargets the animation. Motion restarts from the value currently on
    /// screen, so a mid-flight retarget reverses smoothly instead of
    /// snapping back to the old start.
    pub fn set_target(&mut self, target: T) {
        self.start = self.current.clone();
        self.target = target;
        self.start_time = Some(now());
    }

    /// Steps the animation against the clock. Returns `true` while motion is
    /// still in flight.
    pub fn update(&mut self) -> bool {
        if let Some(start) = self.start_time {
            let elapsed = now().saturating_duration_since(start);

            if elapsed < self.spec.delay {
                return true;
            }

            let animation_time = elapsed - self.spec.delay;

            if animation_time >= self.spec.duration {
                self.current = self.target.clone();
                self.start_time = None;
                return false;
            }

            let t = animation_time.as_secs_f32() / self.spec.duration.as_secs_f32();
            let eased_t = self.spec.easing.interpolate(t);
            self.current = self.start.interpolate(&self.target, eased_t);

            true
        } else {
            false
        }
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn is_animating(&self) -> bool {
        self.start_time.is_some()
    }
}
