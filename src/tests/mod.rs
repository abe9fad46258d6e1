use std::time::Duration;

use lightbox_config::{Config, Image, Point, Rect, Size};

use crate::animation::Clock;
use crate::input::{DragSample, GestureRelease, TapEvent};
use crate::lightbox::{HostEvent, Lightbox, RecordingHost, ReleaseAction};

mod double_tap;

const VIEWPORT: Size = Size::new(400., 800.);

struct Fixture {
    clock: Clock,
    lightbox: Lightbox<RecordingHost>,
}

fn config(images: usize) -> Config {
    Config {
        origin: Rect::new(10., 20., 100., 50.),
        images: (0..images)
            .map(|idx| Image {
                url: format!("{idx}.jpg"),
                width: 400.,
                height: 300.,
            })
            .collect(),
        ..Config::default()
    }
}

impl Fixture {
    fn new(images: usize) -> Self {
        Self::with_config(config(images))
    }

    fn with_config(config: Config) -> Self {
        let clock = Clock::with_time(Duration::ZERO);
        let lightbox = Lightbox::new(config, VIEWPORT, clock.clone(), RecordingHost::new());
        Self { clock, lightbox }
    }

    /// Opens the overlay and waits for it to finish opening.
    fn opened(images: usize) -> Self {
        let mut f = Self::new(images);
        f.lightbox.open();
        f.settle();
        f.events();
        f
    }

    fn advance(&mut self, ms: u64) {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(16);
            self.clock.advance(Duration::from_millis(step));
            self.lightbox.advance_animations();
            remaining -= step;
        }
    }

    fn settle(&mut self) {
        for _ in 0..1000 {
            if !self.lightbox.are_animations_ongoing() {
                return;
            }
            self.advance(16);
        }
        panic!("animations did not settle");
    }

    fn events(&mut self) -> Vec<HostEvent> {
        self.lightbox.host_mut().take()
    }

    fn tap_at(&self, x: f64, y: f64) -> TapEvent {
        TapEvent::new(self.clock.now_unadjusted(), x, y)
    }

    /// Grants a gesture and feeds it `samples`.
    fn drag(&mut self, samples: &[(f64, f64)]) {
        assert!(self.lightbox.begin_gesture(), "gesture was refused");
        for &(dx, dy) in samples {
            self.lightbox.update_gesture(DragSample::new(dx, dy));
        }
    }

    fn release(&mut self, sample: DragSample) -> ReleaseAction {
        self.release_at(sample, 200., 400.)
    }

    fn release_at(&mut self, sample: DragSample, x: f64, y: f64) -> ReleaseAction {
        let tap = self.tap_at(x, y);
        self.lightbox.end_gesture(GestureRelease { sample, tap })
    }

    /// A gesture that does not move, released at `(x, y)`.
    fn tap(&mut self, x: f64, y: f64) -> ReleaseAction {
        self.drag(&[]);
        self.release_at(DragSample::default(), x, y)
    }
}
