use std::time::Duration;

use lightbox_config::{Point, Rect};
use serde::Serialize;

use super::TapEvent;

/// Longest time between two taps of a double-tap.
pub const DOUBLE_TAP_INTERVAL: Duration = Duration::from_millis(500);
/// Largest distance between two taps of a double-tap, per axis.
pub const DOUBLE_TAP_DISTANCE: f64 = 10.;

/// A remembered tap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tap {
    pub timestamp: Duration,
    pub x: f64,
    pub y: f64,
}

/// Recognizes two taps in quick succession at the same spot.
#[derive(Debug, Default, Clone)]
pub struct DoubleTapDetector {
    last_tap: Option<Tap>,
}

/// What a confirmed double-tap does to the focused slide's zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomIntent {
    /// Zoom into a tiny window around the tap, which the slide clamps to its max zoom.
    In,
    /// Zoom to a window larger than any slide, which resets the zoom.
    Out,
}

impl DoubleTapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `tap` against the previous one and remembers it.
    ///
    /// A confirmed double-tap consumes both taps, so the next tap starts a fresh window.
    pub fn evaluate(&mut self, tap: TapEvent) -> bool {
        let current = Tap {
            timestamp: tap.timestamp,
            x: tap.x,
            y: tap.y,
        };

        let is_double_tap = self.last_tap.is_some_and(|last| {
            let in_time = tap
                .timestamp
                .checked_sub(last.timestamp)
                .is_some_and(|elapsed| elapsed < DOUBLE_TAP_INTERVAL);

            in_time
                && (tap.x - last.x).abs() < DOUBLE_TAP_DISTANCE
                && (tap.y - last.y).abs() < DOUBLE_TAP_DISTANCE
                && tap.changed_touches == 1
        });

        if is_double_tap {
            debug!("double-tap at ({}, {})", tap.x, tap.y);
            self.last_tap = None;
        } else {
            self.last_tap = Some(current);
        }

        is_double_tap
    }

    pub fn last_tap(&self) -> Option<Tap> {
        self.last_tap
    }
}

impl ZoomIntent {
    pub fn window_size(self) -> f64 {
        match self {
            ZoomIntent::In => 10.,
            ZoomIntent::Out => 10000.,
        }
    }

    /// Zoom rectangle centered on `(x, y)`.
    pub fn rect_at(self, x: f64, y: f64) -> Rect {
        Rect::centered_square(Point::new(x, y), self.window_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(ms: u64, x: f64, y: f64) -> TapEvent {
        TapEvent::new(Duration::from_millis(ms), x, y)
    }

    #[test]
    fn first_tap_is_never_double() {
        let mut detector = DoubleTapDetector::new();
        assert!(!detector.evaluate(tap(0, 50., 50.)));
        assert_eq!(detector.last_tap().map(|t| t.x), Some(50.));
    }

    #[test]
    fn too_slow() {
        let mut detector = DoubleTapDetector::new();
        assert!(!detector.evaluate(tap(0, 50., 50.)));
        assert!(!detector.evaluate(tap(500, 50., 50.)));
        // The slow tap became the new reference.
        assert!(detector.evaluate(tap(700, 51., 49.)));
    }

    #[test]
    fn too_far() {
        let mut detector = DoubleTapDetector::new();
        assert!(!detector.evaluate(tap(0, 50., 50.)));
        assert!(!detector.evaluate(tap(100, 60., 50.)));
        assert!(!detector.evaluate(tap(200, 60., 40.)));
    }

    #[test]
    fn multi_touch_is_not_double() {
        let mut detector = DoubleTapDetector::new();
        assert!(!detector.evaluate(tap(0, 50., 50.)));
        let mut second = tap(100, 50., 50.);
        second.changed_touches = 2;
        assert!(!detector.evaluate(second));
    }

    #[test]
    fn clock_going_backwards_is_not_double() {
        let mut detector = DoubleTapDetector::new();
        assert!(!detector.evaluate(tap(1000, 50., 50.)));
        assert!(!detector.evaluate(tap(900, 50., 50.)));
    }

    #[test]
    fn zoom_rects() {
        assert_eq!(ZoomIntent::In.rect_at(100., 40.), Rect::new(95., 35., 10., 10.));
        assert_eq!(
            ZoomIntent::Out.rect_at(100., 40.),
            Rect::new(-4900., -4960., 10000., 10000.)
        );
    }
}
