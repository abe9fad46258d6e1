use crate::animation::{Animation, Clock};
use crate::utils::id::Generation;

/// One animatable scalar of the overlay.
///
/// The rendered value is `offset + value`. The value either tracks input directly or runs one
/// animation at a time. Starting an animation, or setting the value, drops the running one.
#[derive(Debug, Default)]
pub struct Channel {
    offset: f64,
    value: f64,
    state: State,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Animating {
        animation: Animation,
        generation: Generation,
    },
}

/// An animation that reached its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settled {
    pub generation: Generation,
    pub target: f64,
}

impl Channel {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Current value without the offset.
    pub fn value(&self) -> f64 {
        match &self.state {
            State::Idle => self.value,
            State::Animating { animation, .. } => animation.value(),
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Jumps to `value`, cancelling any running animation.
    pub fn set_value(&mut self, value: f64) {
        self.state = State::Idle;
        self.value = value;
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Starts animating from the current value to `target`.
    pub fn animate_to(
        &mut self,
        target: f64,
        clock: Clock,
        config: lightbox_config::Animation,
    ) -> Generation {
        let from = self.value();
        let generation = Generation::next();
        let animation = Animation::new(clock, from, target, 0., config);

        if let State::Animating {
            generation: prev, ..
        } = &self.state
        {
            trace!(
                "redirecting animation {} to {target} as {}",
                prev.get(),
                generation.get()
            );
        }

        self.value = from;
        self.state = State::Animating {
            animation,
            generation,
        };
        generation
    }

    /// Checks the running animation and returns it once it is done.
    pub fn advance(&mut self) -> Option<Settled> {
        let State::Animating { animation, .. } = &self.state else {
            return None;
        };

        if !animation.is_done() {
            return None;
        }

        self.finish_now()
    }

    /// Jumps the running animation to its target.
    pub fn finish_now(&mut self) -> Option<Settled> {
        match std::mem::take(&mut self.state) {
            State::Idle => None,
            State::Animating {
                animation,
                generation,
            } => {
                let target = animation.to();
                self.value = target;
                Some(Settled { generation, target })
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, State::Animating { .. })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn config() -> lightbox_config::Animation {
        lightbox_config::Animation::default()
    }

    #[test]
    fn settles_once() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let mut channel = Channel::new(0.);

        let generation = channel.animate_to(1., clock.clone(), config());
        assert!(channel.is_animating());
        assert_eq!(channel.advance(), None);

        clock.advance(Duration::from_secs(2));
        assert_eq!(
            channel.advance(),
            Some(Settled {
                generation,
                target: 1.
            })
        );
        assert_eq!(channel.advance(), None);
        assert_abs_diff_eq!(channel.value(), 1.);
    }

    #[test]
    fn redirect_gets_new_generation() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let mut channel = Channel::new(0.);

        let first = channel.animate_to(1., clock.clone(), config());
        clock.advance(Duration::from_millis(50));
        let value = channel.value();
        let second = channel.animate_to(0., clock.clone(), config());
        assert_ne!(first, second);
        assert_abs_diff_eq!(channel.value(), value);

        clock.advance(Duration::from_secs(2));
        let settled = channel.advance().unwrap();
        assert_eq!(settled.generation, second);
        assert_eq!(settled.target, 0.);
    }

    #[test]
    fn set_value_cancels() {
        let clock = Clock::with_time(Duration::ZERO);
        let mut channel = Channel::new(0.);
        channel.animate_to(1., clock, config());

        channel.set_value(-3.);
        assert!(!channel.is_animating());
        assert_eq!(channel.finish_now(), None);
        assert_eq!(channel.value(), -3.);
    }

    #[test]
    fn offset_is_separate() {
        let mut channel = Channel::new(5.);
        channel.set_offset(-400.);
        assert_eq!(channel.offset(), -400.);
        assert_eq!(channel.value(), 5.);
    }
}
