use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::utils::get_monotonic_time;

/// Shared animation clock.
///
/// The clock reads the monotonic time once and keeps returning it until [`Clock::clear`] is
/// called, so every value computed during one frame sees the same instant. Its rate can be
/// changed to slow animations down, and it can be told to complete all animations instantly.
///
/// A clock made with [`Clock::with_time`] is driven by hand and never reads the monotonic time.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug)]
struct Inner {
    /// Cached unadjusted time, `None` until fetched.
    unadjusted: Option<Duration>,
    /// Unadjusted time at the last rate-adjusted reading.
    last_seen: Duration,
    /// Rate-adjusted time.
    adjusted: Duration,
    rate: f64,
    complete_instantly: bool,
    /// Time only moves through `set_unadjusted()` and `advance()`.
    manual: bool,
}

impl Clock {
    /// Creates a clock frozen at `time` until it is advanced or cleared.
    pub fn with_time(time: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::starting_at(Some(time)))),
        }
    }

    /// Returns the rate-adjusted time.
    pub fn now(&self) -> Duration {
        self.inner.borrow_mut().adjusted_now()
    }

    /// Returns the time without the rate adjustment.
    pub fn now_unadjusted(&self) -> Duration {
        self.inner.borrow_mut().unadjusted_now()
    }

    pub fn set_unadjusted(&mut self, time: Duration) {
        self.inner.borrow_mut().unadjusted = Some(time);
    }

    /// Moves the unadjusted time forward by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        let mut inner = self.inner.borrow_mut();
        let now = inner.unadjusted_now();
        inner.unadjusted = Some(now.saturating_add(delta));
    }

    /// Forgets the cached time so that the next reading fetches it again.
    ///
    /// Does nothing on a clock driven by hand.
    pub fn clear(&mut self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.manual {
            inner.unadjusted = None;
        }
    }

    pub fn is_manual(&self) -> bool {
        self.inner.borrow().manual
    }

    pub fn rate(&self) -> f64 {
        self.inner.borrow().rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.inner.borrow_mut().rate = rate.clamp(0., 1000.);
    }

    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }

    pub fn set_complete_instantly(&mut self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}

impl Inner {
    fn starting_at(unadjusted: Option<Duration>) -> Self {
        let time = unadjusted.unwrap_or_else(get_monotonic_time);
        Self {
            unadjusted: Some(time),
            last_seen: time,
            adjusted: time,
            rate: 1.,
            complete_instantly: false,
            manual: unadjusted.is_some(),
        }
    }

    fn unadjusted_now(&mut self) -> Duration {
        *self.unadjusted.get_or_insert_with(get_monotonic_time)
    }

    fn adjusted_now(&mut self) -> Duration {
        let time = self.unadjusted_now();
        if time == self.last_seen {
            return self.adjusted;
        }

        // Time can go backwards when a test rewinds the clock; scale that too.
        if self.last_seen < time {
            let delta = (time - self.last_seen).mul_f64(self.rate);
            self.adjusted = self.adjusted.saturating_add(delta);
        } else {
            let delta = (self.last_seen - time).mul_f64(self.rate);
            self.adjusted = self.adjusted.saturating_sub(delta);
        }

        self.last_seen = time;
        self.adjusted
    }
}

impl Default for Inner {
    fn default() -> Self {
        Self::starting_at(None)
    }
}
