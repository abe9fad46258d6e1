use lightbox_config::{Rect, Size};
use serde::Serialize;

use crate::input::{DragSample, PanAxis, TapEvent, ZoomIntent};

/// Vertical distance past which a released drag dismisses the overlay.
pub const DISMISS_THRESHOLD: f64 = 150.;
/// Fraction of the viewport width a drag must cover to change slides.
pub const SWIPE_OFFSET_FRACTION: f64 = 0.2;
pub const MIN_SWIPE_OFFSET: f64 = 50.;
/// Horizontal velocity, in px/ms, past which a flick changes slides regardless of distance.
pub const SWIPE_VELOCITY_THRESHOLD: f64 = 1.;

/// Where the content sits when the overlay is fully open.
///
/// Opening always targets the viewport origin at full opacity. A dismissing swipe moves it to
/// the point of release so the close animation starts where the finger let go.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DismissTarget {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
}

/// Everything the release decision looks at.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseInput {
    pub sample: DragSample,
    pub tap: TapEvent,
    pub is_double_tap: bool,
    pub axis: Option<PanAxis>,
    pub focused_index: usize,
    pub image_count: usize,
    pub viewport: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarouselSnap {
    /// Horizontal channel target, relative to the current carousel base.
    pub target_offset: f64,
    pub from_index: usize,
    pub to_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ReleaseAction {
    /// Zoom the focused slide into the tapped spot. Nothing else happens.
    DoubleTap { zoom: Rect },
    /// Close the overlay from the release position.
    Dismiss { target: DismissTarget },
    /// Spring the vertical drag back to rest.
    SpringBack,
    /// Settle the carousel on a slide.
    Snap(CarouselSnap),
    None,
}

impl Default for DismissTarget {
    fn default() -> Self {
        Self {
            x: 0.,
            y: 0.,
            opacity: 1.,
        }
    }
}

impl CarouselSnap {
    pub fn changes_index(&self) -> bool {
        self.from_index != self.to_index
    }
}

/// Decides what a released gesture does.
///
/// Checked in order: double-tap, vertical dismiss, vertical spring-back, carousel snap.
pub fn resolve_release(input: &ReleaseInput) -> ReleaseAction {
    let ReleaseInput {
        sample, tap, axis, ..
    } = *input;

    if input.is_double_tap {
        return ReleaseAction::DoubleTap {
            zoom: ZoomIntent::In.rect_at(tap.x, tap.y),
        };
    }

    match axis {
        Some(PanAxis::Vertical) if sample.dy.abs() > DISMISS_THRESHOLD => {
            ReleaseAction::Dismiss {
                target: DismissTarget {
                    x: sample.dx,
                    y: sample.dy,
                    opacity: 1. - (sample.dy / input.viewport.height).abs(),
                },
            }
        }
        Some(PanAxis::Vertical) => ReleaseAction::SpringBack,
        Some(PanAxis::Horizontal) => ReleaseAction::Snap(carousel_snap(input)),
        None => ReleaseAction::None,
    }
}

fn carousel_snap(input: &ReleaseInput) -> CarouselSnap {
    let width = input.viewport.width;
    let offset_threshold = f64::max(width * SWIPE_OFFSET_FRACTION, MIN_SWIPE_OFFSET);
    let DragSample { dx, vx, .. } = input.sample;
    let index = input.focused_index;
    let last = input.image_count.saturating_sub(1);

    let wants_next = dx < -offset_threshold || vx < -SWIPE_VELOCITY_THRESHOLD;
    let wants_prev = dx > offset_threshold || vx > SWIPE_VELOCITY_THRESHOLD;

    let (target_offset, to_index) = if wants_next && index < last {
        (-width, index + 1)
    } else if wants_prev && index > 0 {
        (width, index - 1)
    } else {
        (0., index)
    };

    CarouselSnap {
        target_offset,
        from_index: index,
        to_index,
    }
}
