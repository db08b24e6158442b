use std::cell::RefCell;

use velum_core::animation::{AnimatedValue, AnimationSpec};
use velum_core::remember_with_key;

/// Animate f32 to the given target; returns the current value each frame.
pub fn animate_f32(key: impl Into<String>, target: f32, spec: AnimationSpec) -> f32 {
    let key = key.into();
    let anim = remember_with_key(format!("anim:f32:{key}"), || {
        RefCell::new(AnimatedValue::new(target, spec))
    });
    let mut a = anim.borrow_mut();
    if *a.target() != target {
        a.set_target(target);
    }
    a.update();
    *a.get()
}

/// Like `animate_f32`, but the first frame starts from `initial` rather than
/// `target`, so a freshly mounted view can animate in.
pub fn animate_f32_from(
    key: impl Into<String>,
    initial: f32,
    target: f32,
    spec: AnimationSpec,
) -> f32 {
    let key = key.into();
    let anim = remember_with_key(format!("anim:f32:{key}"), || {
        RefCell::new(AnimatedValue::new(initial, spec))
    });
    let mut a = anim.borrow_mut();
    if *a.target() != target {
        a.set_target(target);
    }
    a.update();
    *a.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use velum_core::animation::{Easing, TestClock};
    use velum_core::{COMPOSER, compose_frame};
    use velum_core::{View, ViewKind};
    use web_time::Duration;

    fn reset() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());
    }

    #[test]
    fn animate_from_initial_reaches_target() {
        reset();
        let clock = TestClock::install();
        let spec = AnimationSpec::tween(Duration::from_millis(100), Easing::Linear);

        let mut last = 0.0;
        let _ = compose_frame(|| {
            last = animate_f32_from("t", 0.0, 1.0, spec);
            View::new(0, ViewKind::Box)
        });
        assert_eq!(last, 0.0);

        clock.advance(Duration::from_millis(50));
        let _ = compose_frame(|| {
            last = animate_f32_from("t", 0.0, 1.0, spec);
            View::new(0, ViewKind::Box)
        });
        assert!((last - 0.5).abs() < 0.01);

        clock.advance(Duration::from_millis(60));
        let _ = compose_frame(|| {
            last = animate_f32_from("t", 0.0, 1.0, spec);
            View::new(0, ViewKind::Box)
        });
        assert_eq!(last, 1.0);
    }

    #[test]
    fn retarget_does_not_restart_elapsed_time() {
        reset();
        let clock = TestClock::install();
        let spec = AnimationSpec::tween(Duration::from_millis(100), Easing::Linear);

        let step = |v: &mut f32| {
            let _ = compose_frame(|| {
                *v = animate_f32("r", 1.0, spec);
                View::new(0, ViewKind::Box)
            });
        };

        let mut last = 1.0;
        step(&mut last);
        assert_eq!(last, 1.0); // already at target, no motion

        // Re-composing every frame with the same target must not reset the
        // animation clock once motion has started.
        let _ = compose_frame(|| {
            last = animate_f32("r", 0.0, spec);
            View::new(0, ViewKind::Box)
        });
        clock.advance(Duration::from_millis(50));
        let _ = compose_frame(|| {
            last = animate_f32("r", 0.0, spec);
            View::new(0, ViewKind::Box)
        });
        assert!((last - 0.5).abs() < 0.01);
    }
}
