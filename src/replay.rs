//! Scripted gesture replay.
//!
//! A script is a JSON object with an optional `viewport` and a list of `events`. Events drive
//! the overlay on a simulated clock that only moves on `advance` and `settle`, in 16 ms
//! frames. Every host callback is recorded.
//!
//! ```json
//! {
//!     "viewport": { "width": 400, "height": 800 },
//!     "events": [
//!         { "type": "open" },
//!         { "type": "settle" },
//!         { "type": "grant" },
//!         { "type": "move", "dx": -120, "dy": 4 },
//!         { "type": "release", "dx": -120, "dy": 4, "x": 200, "y": 300 },
//!         { "type": "settle" }
//!     ]
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use lightbox_config::{Config, Size};
use serde::{Deserialize, Serialize};

use crate::animation::Clock;
use crate::input::{DragSample, GestureRelease, TapEvent};
use crate::lightbox::{
    HostEvent, Lightbox, OverlayFrame, OverlaySessionState, RecordingHost, ReleaseAction,
};

const FRAME: Duration = Duration::from_millis(16);
/// Upper bound for `settle`, in case an animation never comes to rest.
const MAX_SETTLE: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ScriptEvent {
    Open,
    Close,
    Grant,
    Move(DragSample),
    Release {
        #[serde(flatten)]
        sample: DragSample,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default = "one")]
        touches: usize,
    },
    Cancel,
    Tap {
        x: f64,
        y: f64,
        #[serde(default = "one")]
        touches: usize,
    },
    Advance {
        ms: u64,
    },
    /// Runs frames until no animation is left.
    Settle,
    Rotate {
        width: f64,
        height: f64,
    },
    Focus {
        index: usize,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub event: ScriptEvent,
    /// Simulated time after the step, in milliseconds.
    pub time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseAction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub host_events: Vec<HostEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Replay {
    pub steps: Vec<Step>,
    pub state: OverlaySessionState,
    pub frame: OverlayFrame,
}

fn default_viewport() -> Size {
    Size::new(400., 800.)
}

fn one() -> usize {
    1
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("error reading script at {path:?}"))?;
        Self::parse(&contents).with_context(|| format!("error parsing script at {path:?}"))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let script: Self = serde_json::from_str(text)?;
        anyhow::ensure!(
            script.viewport.is_finite() && script.viewport.width > 0. && script.viewport.height > 0.,
            "viewport must be positive, got {}x{}",
            script.viewport.width,
            script.viewport.height
        );
        Ok(script)
    }
}

/// Runs `script` against a fresh overlay.
pub fn replay(config: Config, script: &Script) -> Replay {
    let _span = tracy_client::span!("replay");

    let mut clock = Clock::with_time(Duration::ZERO);
    let mut lightbox = Lightbox::new(config, script.viewport, clock.clone(), RecordingHost::new());
    let mut steps = Vec::with_capacity(script.events.len());

    for event in &script.events {
        let mut accepted = None;
        let mut release = None;

        match *event {
            ScriptEvent::Open => lightbox.open(),
            ScriptEvent::Close => lightbox.close(),
            ScriptEvent::Grant => accepted = Some(lightbox.begin_gesture()),
            ScriptEvent::Move(sample) => lightbox.update_gesture(sample),
            ScriptEvent::Release {
                sample,
                x,
                y,
                touches,
            } => {
                let tap = tap_at(&clock, x, y, touches);
                release = Some(lightbox.end_gesture(GestureRelease { sample, tap }));
            }
            ScriptEvent::Cancel => lightbox.cancel_gesture(),
            ScriptEvent::Tap { x, y, touches } => {
                let tap = tap_at(&clock, x, y, touches);
                accepted = Some(lightbox.on_touch_end(tap));
            }
            ScriptEvent::Advance { ms } => {
                run_frames(&mut lightbox, &mut clock, Duration::from_millis(ms));
            }
            ScriptEvent::Settle => {
                let mut elapsed = Duration::ZERO;
                while lightbox.are_animations_ongoing() && elapsed < MAX_SETTLE {
                    run_frames(&mut lightbox, &mut clock, FRAME);
                    elapsed += FRAME;
                }
                if lightbox.are_animations_ongoing() {
                    warn!("animations still running after {MAX_SETTLE:?}");
                }
            }
            ScriptEvent::Rotate { width, height } => {
                lightbox.set_viewport_size(Size::new(width, height));
            }
            ScriptEvent::Focus { index } => lightbox.set_focused_index(index),
        }

        let host_events = lightbox.host_mut().take();
        let time_ms = clock.now_unadjusted().as_millis() as u64;
        for ev in &host_events {
            debug!("{time_ms} ms: {ev:?}");
        }

        steps.push(Step {
            event: event.clone(),
            time_ms,
            accepted,
            release,
            host_events,
        });
    }

    Replay {
        steps,
        state: lightbox.state(),
        frame: lightbox.frame(),
    }
}

fn tap_at(clock: &Clock, x: f64, y: f64, touches: usize) -> TapEvent {
    TapEvent {
        timestamp: clock.now_unadjusted(),
        x,
        y,
        changed_touches: touches,
    }
}

fn run_frames(lightbox: &mut Lightbox<RecordingHost>, clock: &mut Clock, duration: Duration) {
    let mut remaining = duration;
    while !remaining.is_zero() {
        let step = remaining.min(FRAME);
        clock.advance(step);
        lightbox.advance_animations();
        remaining -= step;
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn parse_events() {
        let script = Script::parse(
            r#"{
                "events": [
                    { "type": "open" },
                    { "type": "move", "dx": 3, "dy": -1 },
                    { "type": "release", "dx": 3, "dy": -1, "vx": 0.5, "x": 10, "y": 20 },
                    { "type": "advance", "ms": 100 },
                    { "type": "rotate", "width": 800, "height": 400 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.viewport, default_viewport());
        assert_eq!(
            script.events[1],
            ScriptEvent::Move(DragSample::new(3., -1.))
        );
        assert_eq!(
            script.events[2],
            ScriptEvent::Release {
                sample: DragSample::new(3., -1.).with_velocity(0.5, 0.),
                x: 10.,
                y: 20.,
                touches: 1,
            }
        );
    }

    #[test]
    fn unknown_event_is_an_error() {
        let err = Script::parse(r#"{ "events": [{ "type": "jump" }] }"#).unwrap_err();
        assert!(err.to_string().contains("unknown variant `jump`"), "{err}");
    }

    #[test]
    fn zero_viewport_is_an_error() {
        let err = Script::parse(r#"{ "viewport": { "width": 0, "height": 10 }, "events": [] }"#)
            .unwrap_err();
        assert_snapshot!(err.to_string(), @"viewport must be positive, got 0x10");
    }

    #[test]
    fn open_and_settle() {
        let script = Script::parse(r#"{ "events": [{ "type": "open" }, { "type": "settle" }] }"#)
            .unwrap();
        let replay = replay(Config::default(), &script);

        assert_eq!(
            replay.steps[0].host_events,
            vec![HostEvent::StatusBarHidden { hidden: true }]
        );
        assert_eq!(replay.steps[1].host_events, vec![HostEvent::Open]);
        assert!(replay.steps[1].time_ms > 0);
        assert_eq!(replay.state.open_progress, 1.);
    }
}
