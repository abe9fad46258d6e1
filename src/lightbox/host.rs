use lightbox_config::{Point, Rect};
use serde::Serialize;

/// Callbacks from the overlay to the application hosting it.
///
/// Every method defaults to doing nothing, so a host only implements what it cares about.
pub trait LightboxHost {
    /// The open animation finished.
    fn on_open(&mut self) {}

    /// The close animation finished.
    fn on_close(&mut self) {}

    /// A carousel swipe settled on a different slide.
    fn on_focused_child_index(&mut self, _index: usize) {}

    fn set_status_bar_hidden(&mut self, _hidden: bool) {}

    /// Asks the zoom viewport of `slide` to show `rect`.
    fn zoom_to(&mut self, _slide: usize, _rect: Rect, _animated: bool) {}

    /// Asks the zoom viewport of `slide` to scroll its content to `point`.
    fn scroll_to(&mut self, _slide: usize, _point: Point) {}

    /// Whether the host draws its own header in place of the default close button.
    ///
    /// A custom header closes the overlay by calling [`Lightbox::close`](super::Lightbox::close).
    fn renders_header(&self) -> bool {
        false
    }
}

/// Host that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl LightboxHost for NoopHost {}

/// One host callback, as recorded by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum HostEvent {
    Open,
    Close,
    FocusedChildIndex { index: usize },
    StatusBarHidden { hidden: bool },
    ZoomTo { slide: usize, rect: Rect, animated: bool },
    ScrollTo { slide: usize, point: Point },
}

/// Host that keeps a log of every callback.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    pub custom_header: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events and clears the log.
    pub fn take(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }
}

impl LightboxHost for RecordingHost {
    fn on_open(&mut self) {
        self.events.push(HostEvent::Open);
    }

    fn on_close(&mut self) {
        self.events.push(HostEvent::Close);
    }

    fn on_focused_child_index(&mut self, index: usize) {
        self.events.push(HostEvent::FocusedChildIndex { index });
    }

    fn set_status_bar_hidden(&mut self, hidden: bool) {
        self.events.push(HostEvent::StatusBarHidden { hidden });
    }

    fn zoom_to(&mut self, slide: usize, rect: Rect, animated: bool) {
        self.events.push(HostEvent::ZoomTo {
            slide,
            rect,
            animated,
        });
    }

    fn scroll_to(&mut self, slide: usize, point: Point) {
        self.events.push(HostEvent::ScrollTo { slide, point });
    }

    fn renders_header(&self) -> bool {
        self.custom_header
    }
}
