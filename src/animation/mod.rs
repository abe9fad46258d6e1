use std::time::Duration;

use keyframe::functions::{EaseOutCubic, EaseOutQuad};
use keyframe::EasingFunction;

mod spring;
pub use spring::{Spring, SpringParams, REST_EPSILON};

mod clock;
pub use clock::Clock;

/// One value moving from `from` to `to` over time.
#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    is_off: bool,
    duration: Duration,
    start_time: Duration,
    clock: Clock,
    kind: Kind,
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Easing { curve: Curve },
    Spring(Spring),
}

#[derive(Debug, Clone, Copy)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
}

impl Animation {
    /// Creates an animation with the configured kind.
    ///
    /// `initial_velocity` is in units per second of unadjusted time.
    pub fn new(
        clock: Clock,
        from: f64,
        to: f64,
        initial_velocity: f64,
        config: lightbox_config::Animation,
    ) -> Self {
        // Scale the velocity so that a slowed down clock keeps the hand-off smooth.
        let initial_velocity = initial_velocity / clock.rate().max(0.001);

        if config.off {
            let mut rv = Self::ease(clock, from, to, 0, Curve::Linear);
            rv.is_off = true;
            return rv;
        }

        match config.kind {
            lightbox_config::AnimationKind::Spring(p) => {
                let params =
                    SpringParams::from_tension_friction(p.tension, p.friction, REST_EPSILON);
                let spring = Spring {
                    from,
                    to,
                    initial_velocity,
                    params,
                };
                Self::spring(clock, spring)
            }
            lightbox_config::AnimationKind::Easing(p) => Self::ease(
                clock,
                from,
                to,
                u64::from(p.duration_ms),
                Curve::from(p.curve),
            ),
        }
    }

    pub fn ease(clock: Clock, from: f64, to: f64, duration_ms: u64, curve: Curve) -> Self {
        let duration = Duration::from_millis(duration_ms);

        Self {
            from,
            to,
            is_off: false,
            duration,
            start_time: clock.now(),
            clock,
            kind: Kind::Easing { curve },
        }
    }

    pub fn spring(clock: Clock, spring: Spring) -> Self {
        let _span = tracy_client::span!("Animation::spring");

        let duration = spring.duration();

        Self {
            from: spring.from,
            to: spring.to,
            is_off: false,
            duration,
            start_time: clock.now(),
            clock,
            kind: Kind::Spring(spring),
        }
    }

    pub fn is_done(&self) -> bool {
        if self.is_off || self.clock.should_complete_instantly() {
            return true;
        }

        self.clock.now() >= self.start_time.saturating_add(self.duration)
    }

    pub fn value_at(&self, at: Duration) -> f64 {
        if self.is_off || self.clock.should_complete_instantly() {
            return self.to;
        }

        if at <= self.start_time {
            return self.from;
        } else if self.start_time.saturating_add(self.duration) <= at {
            return self.to;
        }

        let passed = at.saturating_sub(self.start_time);

        match self.kind {
            Kind::Easing { curve } => {
                let x = (passed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0., 1.);
                curve.y(x) * (self.to - self.from) + self.from
            }
            Kind::Spring(spring) => {
                let value = spring.value_at(passed);

                // Protect against numerical instability blowing the value up.
                let range = (self.to - self.from) * 10.;
                let a = self.from - range;
                let b = self.to + range;
                if self.from <= self.to {
                    value.clamp(a, b)
                } else {
                    value.clamp(b, a)
                }
            }
        }
    }

    pub fn value(&self) -> f64 {
        self.value_at(self.clock.now())
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Curve {
    pub fn y(self, x: f64) -> f64 {
        match self {
            Curve::Linear => x,
            Curve::EaseOutQuad => EaseOutQuad.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::EaseOutExpo => 1. - 2f64.powf(-10. * x),
        }
    }
}

impl From<lightbox_config::AnimationCurve> for Curve {
    fn from(value: lightbox_config::AnimationCurve) -> Self {
        match value {
            lightbox_config::AnimationCurve::Linear => Curve::Linear,
            lightbox_config::AnimationCurve::EaseOutQuad => Curve::EaseOutQuad,
            lightbox_config::AnimationCurve::EaseOutCubic => Curve::EaseOutCubic,
            lightbox_config::AnimationCurve::EaseOutExpo => Curve::EaseOutExpo,
        }
    }
}
