//! The overlay gesture and animation state machine.
//!
//! The overlay owns three animatable channels: horizontal pan, vertical pan and open progress.
//! Input moves them directly while a gesture is active. Lifecycle changes and gesture releases
//! start animations on them. The host calls [`Lightbox::advance_animations`] once per frame,
//! and the follow-up of every animation (firing callbacks, folding offsets) runs when its
//! channel settles.

use lightbox_config::{Config, Point, Rect, Size};
use serde::Serialize;

use crate::animation::Clock;
use crate::input::{
    AxisLock, DoubleTapDetector, DragSample, GestureRelease, PanAxis, Tap, TapEvent, ZoomIntent,
};
use crate::utils::id::Generation;

mod channel;
mod frame;
mod host;
mod release;

pub use channel::{Channel, Settled};
pub use frame::{HeaderFrame, OverlayFrame, SlideFrame, CLOSE_BUTTON_SIZE};
pub use host::{HostEvent, LightboxHost, NoopHost, RecordingHost};
pub use release::{
    resolve_release, CarouselSnap, DismissTarget, ReleaseAction, ReleaseInput, DISMISS_THRESHOLD,
    MIN_SWIPE_OFFSET, SWIPE_OFFSET_FRACTION, SWIPE_VELOCITY_THRESHOLD,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lifecycle {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Snapshot of the overlay for rendering and inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySessionState {
    pub lifecycle: Lifecycle,
    pub focused_index: usize,
    /// Horizontal position of the focused slide's strip, `-focused_index * viewport.width`
    /// between gestures.
    pub carousel_base_offset: f64,
    pub pan_axis: Option<PanAxis>,
    pub live_drag: LiveDrag,
    pub open_progress: f64,
    pub dismiss_target: DismissTarget,
    /// Tap the next one is checked against. A confirmed double-tap consumes it, leaving `None`.
    pub last_tap: Option<Tap>,
    pub viewport: Size,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct LiveDrag {
    pub dx: f64,
    pub dy: f64,
}

/// State of the gesture between grant and release.
#[derive(Debug, Default)]
struct GestureContext {
    lock: AxisLock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelId {
    X,
    Y,
    Progress,
}

/// What to do when an animation settles.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Continuation {
    Opened,
    Closed,
    VerticalRest,
    CarouselRest(CarouselSnap),
}

#[derive(Debug)]
struct Pending {
    channel: ChannelId,
    generation: Generation,
    continuation: Continuation,
}

pub struct Lightbox<H: LightboxHost = NoopHost> {
    config: Config,
    animation: lightbox_config::Animation,
    clock: Clock,
    host: H,

    lifecycle: Lifecycle,
    focused_index: usize,
    pan_axis: Option<PanAxis>,
    dismiss_target: DismissTarget,
    viewport: Size,
    taps: DoubleTapDetector,

    gesture: Option<GestureContext>,
    /// Focus change that arrived while panning.
    pending_focus: Option<usize>,

    /// Live horizontal drag, offset by the carousel base.
    x: Channel,
    /// Live vertical drag.
    y: Channel,
    /// Open progress, 0 at the thumbnail and 1 fully open.
    progress: Channel,
    pending: Vec<Pending>,
}

impl<H: LightboxHost> Lightbox<H> {
    pub fn new(config: Config, viewport: Size, mut clock: Clock, host: H) -> Self {
        clock.set_rate(1. / config.animations.slowdown);

        let animation = config.animation();
        let focused_index = clamp_index(config.focused_child_index, config.images.len());

        let mut x = Channel::new(0.);
        x.set_offset(-(focused_index as f64) * viewport.width);

        Self {
            config,
            animation,
            clock,
            host,
            lifecycle: Lifecycle::Closed,
            focused_index,
            pan_axis: None,
            dismiss_target: DismissTarget::default(),
            viewport,
            taps: DoubleTapDetector::new(),
            gesture: None,
            pending_focus: None,
            x,
            y: Channel::new(0.),
            progress: Channel::new(0.),
            pending: Vec::new(),
        }
    }

    pub fn open(&mut self) {
        if self.lifecycle != Lifecycle::Closed {
            debug!("ignoring open while {:?}", self.lifecycle);
            return;
        }

        debug!("opening at slide {}", self.focused_index);
        self.host.set_status_bar_hidden(true);

        // Drop leftovers of the previous session.
        self.gesture = None;
        self.pan_axis = None;
        self.pending.clear();
        if let Some(index) = self.pending_focus.take() {
            self.focused_index = index;
        }
        self.x.set_value(0.);
        self.x.set_offset(self.base_offset_for(self.focused_index));
        self.y.set_value(0.);
        self.dismiss_target = DismissTarget::default();

        self.lifecycle = Lifecycle::Opening;
        self.animate(ChannelId::Progress, 1., Continuation::Opened);
    }

    pub fn close(&mut self) {
        if !matches!(self.lifecycle, Lifecycle::Opening | Lifecycle::Open) {
            debug!("ignoring close while {:?}", self.lifecycle);
            return;
        }

        debug!("closing from {:?}", self.lifecycle);
        self.host.set_status_bar_hidden(false);

        if self.gesture.take().is_some() {
            trace!("dropping active gesture");
            self.pan_axis = None;
        }

        self.lifecycle = Lifecycle::Closing;
        self.animate(ChannelId::Progress, 0., Continuation::Closed);
        self.apply_pending_focus();
    }

    /// Offers a new gesture to the overlay. Returns whether the overlay took it.
    pub fn begin_gesture(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Open || !self.config.swipe_to_dismiss {
            trace!(
                "refusing gesture: {:?}, swipe to dismiss {}",
                self.lifecycle,
                self.config.swipe_to_dismiss
            );
            return false;
        }

        if self.gesture.is_some() {
            trace!("refusing gesture: one is already active");
            return false;
        }

        // A gesture starts from rest.
        self.settle_now(ChannelId::X);
        self.settle_now(ChannelId::Y);

        self.x.set_value(0.);
        self.y.set_value(0.);
        self.pan_axis = None;
        self.gesture = Some(GestureContext::default());
        trace!("gesture granted");
        true
    }

    pub fn update_gesture(&mut self, sample: DragSample) {
        let Some(gesture) = &mut self.gesture else {
            trace!("ignoring drag sample without a gesture");
            return;
        };

        let axis = gesture.lock.update(sample);
        if let Some(axis) = axis {
            self.drag_channel(axis).set_value(axis.delta(sample));
        }
        self.pan_axis = axis;
    }

    /// Ends the active gesture and applies what it resolves to.
    pub fn end_gesture(&mut self, release: GestureRelease) -> ReleaseAction {
        if self.gesture.take().is_none() {
            trace!("ignoring release without a gesture");
            return ReleaseAction::None;
        }

        let is_double_tap = self.taps.evaluate(release.tap);
        let action = resolve_release(&ReleaseInput {
            sample: release.sample,
            tap: release.tap,
            is_double_tap,
            axis: self.pan_axis,
            focused_index: self.focused_index,
            image_count: self.config.images.len(),
            viewport: self.viewport,
        });
        debug!("gesture released: {action:?}");

        match action {
            ReleaseAction::DoubleTap { zoom } => {
                self.host.zoom_to(self.focused_index, zoom, true);
                self.drop_drag();
                self.apply_pending_focus();
            }
            ReleaseAction::Dismiss { target } => {
                self.dismiss_target = target;
                self.pan_axis = None;
                self.close();
            }
            ReleaseAction::SpringBack => {
                self.animate(ChannelId::Y, 0., Continuation::VerticalRest);
            }
            ReleaseAction::Snap(snap) => {
                self.focused_index = snap.to_index;
                self.animate(
                    ChannelId::X,
                    snap.target_offset,
                    Continuation::CarouselRest(snap),
                );
            }
            ReleaseAction::None => {
                self.pan_axis = None;
                self.apply_pending_focus();
            }
        }

        action
    }

    /// Ends the active gesture without evaluating it, returning the drag to rest.
    pub fn cancel_gesture(&mut self) {
        if self.gesture.take().is_none() {
            return;
        }

        debug!("gesture cancelled with {:?} axis", self.pan_axis);
        match self.pan_axis {
            Some(PanAxis::Vertical) => {
                self.animate(ChannelId::Y, 0., Continuation::VerticalRest);
            }
            Some(PanAxis::Horizontal) => {
                let snap = CarouselSnap {
                    target_offset: 0.,
                    from_index: self.focused_index,
                    to_index: self.focused_index,
                };
                self.animate(ChannelId::X, 0., Continuation::CarouselRest(snap));
            }
            None => self.apply_pending_focus(),
        }
    }

    /// Handles a touch that ended outside of gesture handling.
    ///
    /// Only used when swipe to dismiss is off, since the gesture release sees every touch
    /// otherwise. A double-tap resets the focused slide's zoom.
    pub fn on_touch_end(&mut self, tap: TapEvent) -> bool {
        if self.config.swipe_to_dismiss || self.lifecycle != Lifecycle::Open {
            return false;
        }

        if !self.taps.evaluate(tap) {
            return false;
        }

        let rect = ZoomIntent::Out.rect_at(tap.x, tap.y);
        self.host.zoom_to(self.focused_index, rect, true);
        true
    }

    /// Updates the viewport, for example after a rotation.
    pub fn set_viewport_size(&mut self, size: Size) {
        if !size.is_finite() {
            warn!("ignoring invalid viewport size {size:?}");
            return;
        }

        debug!("viewport changed to {}x{}", size.width, size.height);

        // Offsets folded after this point would mix the old and the new width.
        self.settle_now(ChannelId::X);
        self.settle_now(ChannelId::Y);

        self.viewport = size;
        self.x.set_offset(self.base_offset_for(self.focused_index));

        if self.lifecycle == Lifecycle::Open {
            self.recenter_slides();
        }
    }

    /// Jumps to `index` without animating.
    ///
    /// While the user is panning, the jump waits until the pan comes to rest.
    pub fn set_focused_index(&mut self, index: usize) {
        let count = self.config.images.len();
        let clamped = clamp_index(index, count);
        if clamped != index {
            warn!("focused index {index} is out of range for {count} images, using {clamped}");
        }

        if self.is_panning() {
            debug!("deferring focus change to {clamped} until the pan settles");
            self.pending_focus = Some(clamped);
            return;
        }

        debug!("focusing slide {clamped}");
        self.focused_index = clamped;
        self.x.set_offset(self.base_offset_for(clamped));
        self.x.set_value(0.);
    }

    /// Polls the running animations and runs the follow-up of the ones that finished.
    ///
    /// Call once per frame. A live clock is re-read at the start of every call.
    pub fn advance_animations(&mut self) {
        let _span = tracy_client::span!("Lightbox::advance_animations");

        self.clock.clear();

        for id in [ChannelId::Progress, ChannelId::X, ChannelId::Y] {
            if let Some(settled) = self.channel_mut(id).advance() {
                self.on_settled(id, settled);
            }
        }
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.progress.is_animating() || self.x.is_animating() || self.y.is_animating()
    }

    pub fn state(&self) -> OverlaySessionState {
        OverlaySessionState {
            lifecycle: self.lifecycle,
            focused_index: self.focused_index,
            carousel_base_offset: self.x.offset(),
            pan_axis: self.pan_axis,
            live_drag: LiveDrag {
                dx: self.x.value(),
                dy: self.y.value(),
            },
            open_progress: self.progress.value(),
            dismiss_target: self.dismiss_target,
            last_tap: self.taps.last_tap(),
            viewport: self.viewport,
        }
    }

    pub fn frame(&self) -> OverlayFrame {
        let mut frame = OverlayFrame::compute(&self.config, &self.state());
        if self.host.renders_header() {
            frame.header.close_button = None;
        }
        frame
    }

    /// Handles a press on the header at `point`. Returns whether it hit the close button.
    pub fn press_header(&mut self, point: Point) -> bool {
        if !matches!(self.lifecycle, Lifecycle::Opening | Lifecycle::Open) {
            return false;
        }

        let hit = self
            .frame()
            .header
            .close_button
            .is_some_and(|button| button.contains(point));
        if hit {
            debug!("close button pressed");
            self.close();
        }
        hit
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Whether a gesture is active or its drag has not come to rest yet.
    pub fn is_panning(&self) -> bool {
        self.gesture.is_some()
            || self
                .pending
                .iter()
                .any(|p| matches!(p.channel, ChannelId::X | ChannelId::Y))
    }

    fn channel_mut(&mut self, id: ChannelId) -> &mut Channel {
        match id {
            ChannelId::X => &mut self.x,
            ChannelId::Y => &mut self.y,
            ChannelId::Progress => &mut self.progress,
        }
    }

    fn animate(&mut self, id: ChannelId, target: f64, continuation: Continuation) {
        let clock = self.clock.clone();
        let config = self.animation;
        let generation = self.channel_mut(id).animate_to(target, clock, config);

        // The previous animation on this channel will never settle.
        self.pending.retain(|p| p.channel != id);
        self.pending.push(Pending {
            channel: id,
            generation,
            continuation,
        });
    }

    /// Completes the running animation of a channel right away.
    fn settle_now(&mut self, id: ChannelId) {
        if let Some(settled) = self.channel_mut(id).finish_now() {
            self.on_settled(id, settled);
        }
    }

    fn on_settled(&mut self, id: ChannelId, settled: Settled) {
        let idx = self
            .pending
            .iter()
            .position(|p| p.channel == id && p.generation == settled.generation);
        let Some(idx) = idx else {
            trace!(
                "dropping stale completion {} on {id:?}",
                settled.generation.get()
            );
            return;
        };
        let pending = self.pending.swap_remove(idx);

        match pending.continuation {
            Continuation::Opened => {
                debug!("open animation finished");
                self.lifecycle = Lifecycle::Open;
                self.host.on_open();
            }
            Continuation::Closed => {
                debug!("close animation finished");
                self.lifecycle = Lifecycle::Closed;
                self.host.on_close();
            }
            Continuation::VerticalRest => {
                self.pan_axis = None;
                self.apply_pending_focus();
            }
            Continuation::CarouselRest(snap) => {
                let base = self.x.offset() + snap.target_offset;
                self.x.set_offset(base);
                self.x.set_value(0.);
                self.pan_axis = None;

                if snap.changes_index() {
                    debug!("carousel settled on slide {}", snap.to_index);
                    self.host.on_focused_child_index(snap.to_index);
                }
                self.apply_pending_focus();
            }
        }
    }

    /// Resets the locked drag channel and forgets the axis.
    fn drop_drag(&mut self) {
        if let Some(axis) = self.pan_axis.take() {
            self.drag_channel(axis).set_value(0.);
        }
    }

    fn drag_channel(&mut self, axis: PanAxis) -> &mut Channel {
        match axis {
            PanAxis::Horizontal => &mut self.x,
            PanAxis::Vertical => &mut self.y,
        }
    }

    fn apply_pending_focus(&mut self) {
        if self.is_panning() {
            return;
        }

        if let Some(index) = self.pending_focus.take() {
            self.set_focused_index(index);
        }
    }

    fn recenter_slides(&mut self) {
        let Size { width, height } = self.viewport;

        for (idx, image) in self.config.images.iter().enumerate() {
            let (w, h) = (image.width, image.height);
            self.host.zoom_to(idx, Rect::new(0., 0., w, h), true);

            let point = Point::new(
                finite_or_zero((width - w) * -0.5),
                finite_or_zero((height - h) * -0.5),
            );
            self.host.scroll_to(idx, point);
        }
    }

    fn base_offset_for(&self, index: usize) -> f64 {
        -(index as f64) * self.viewport.width
    }
}

impl<H: LightboxHost> std::fmt::Debug for Lightbox<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lightbox")
            .field("lifecycle", &self.lifecycle)
            .field("focused_index", &self.focused_index)
            .field("pan_axis", &self.pan_axis)
            .field("gesture", &self.gesture)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

fn clamp_index(index: usize, count: usize) -> usize {
    index.min(count.saturating_sub(1))
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.
    }
}
