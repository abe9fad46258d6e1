//! Touch input consumed by the overlay.
//!
//! The host does touch capture and hit-testing. It hands the overlay cumulative drag samples
//! for the active gesture and discrete tap events when a touch ends.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod axis_lock;
pub mod double_tap;

pub use axis_lock::{AxisLock, PanAxis};
pub use double_tap::{DoubleTapDetector, Tap, ZoomIntent};

/// Cumulative movement of the active gesture since it was granted.
///
/// Displacements are in logical pixels, velocities in pixels per millisecond.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSample {
    pub dx: f64,
    pub dy: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
}

/// A touch that ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapEvent {
    pub timestamp: Duration,
    /// Location relative to the touched slide.
    pub x: f64,
    pub y: f64,
    /// Number of touch points that ended with this event.
    pub changed_touches: usize,
}

/// The last sample of a gesture, together with the touch that ended it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRelease {
    pub sample: DragSample,
    pub tap: TapEvent,
}

impl DragSample {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            vx: 0.,
            vy: 0.,
        }
    }

    pub fn with_velocity(self, vx: f64, vy: f64) -> Self {
        Self { vx, vy, ..self }
    }
}

impl TapEvent {
    /// Single-finger tap.
    pub fn new(timestamp: Duration, x: f64, y: f64) -> Self {
        Self {
            timestamp,
            x,
            y,
            changed_touches: 1,
        }
    }
}
