use super::*;
use crate::lightbox::{DismissTarget, Lifecycle};

#[test]
fn double_tap_zooms_in_on_focused_slide() {
    let mut f = Fixture::opened(3);
    f.lightbox.set_focused_index(1);

    assert_eq!(f.tap(120., 300.), ReleaseAction::None);
    f.advance(200);
    let action = f.tap(122., 302.);

    let zoom = Rect::new(117., 297., 10., 10.);
    assert_eq!(action, ReleaseAction::DoubleTap { zoom });
    assert_eq!(
        f.events(),
        vec![HostEvent::ZoomTo {
            slide: 1,
            rect: zoom,
            animated: true,
        }]
    );
}

#[test]
fn tap_window_restarts_after_double_tap() {
    let mut f = Fixture::opened(1);

    assert_eq!(f.tap(100., 100.), ReleaseAction::None);
    f.advance(200);
    assert!(matches!(f.tap(102., 102.), ReleaseAction::DoubleTap { .. }));
    f.advance(250);
    assert_eq!(f.tap(102., 102.), ReleaseAction::None);
    f.advance(100);
    assert!(matches!(f.tap(105., 99.), ReleaseAction::DoubleTap { .. }));
}

#[test]
fn double_tap_consumes_last_tap() {
    let mut f = Fixture::opened(1);

    f.advance(1000);
    f.tap(100., 100.);
    let last = f.lightbox.state().last_tap.unwrap();
    assert_eq!(last.timestamp, f.clock.now_unadjusted());
    assert_eq!((last.x, last.y), (100., 100.));

    f.advance(200);
    assert!(matches!(f.tap(102., 102.), ReleaseAction::DoubleTap { .. }));
    assert_eq!(f.lightbox.state().last_tap, None);

    f.advance(200);
    f.tap(50., 50.);
    assert_eq!(f.lightbox.state().last_tap.map(|t| t.x), Some(50.));
}

#[test]
fn double_tap_beats_dismiss() {
    let mut f = Fixture::opened(2);

    f.tap(200., 400.);
    f.advance(150);

    f.drag(&[(0., 20.), (0., 300.)]);
    let action = f.release_at(DragSample::new(0., 300.), 203., 404.);
    assert!(matches!(action, ReleaseAction::DoubleTap { .. }), "{action:?}");

    let state = f.lightbox.state();
    assert_eq!(state.lifecycle, Lifecycle::Open);
    assert_eq!(state.dismiss_target, DismissTarget::default());
    assert_eq!(state.pan_axis, None);
    assert_eq!(state.live_drag.dy, 0.);
    assert!(!f.lightbox.is_panning());

    let events = f.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], HostEvent::ZoomTo { slide: 0, .. }));
}

#[test]
fn double_tap_beats_carousel_snap() {
    let mut f = Fixture::opened(2);

    f.tap(200., 400.);
    f.advance(100);
    f.drag(&[(-10., 0.), (-250., 0.)]);
    let action = f.release_at(DragSample::new(-250., 0.), 201., 401.);
    assert!(matches!(action, ReleaseAction::DoubleTap { .. }));

    f.settle();
    let state = f.lightbox.state();
    assert_eq!(state.focused_index, 0);
    assert_eq!(state.carousel_base_offset, 0.);
}

#[test]
fn two_finger_release_is_not_a_double_tap() {
    let mut f = Fixture::opened(1);

    f.tap(100., 100.);
    f.advance(100);
    f.drag(&[]);
    let mut tap = f.tap_at(100., 100.);
    tap.changed_touches = 2;
    let action = f.lightbox.end_gesture(GestureRelease {
        sample: DragSample::default(),
        tap,
    });
    assert_eq!(action, ReleaseAction::None);
}

#[test]
fn plain_double_tap_zooms_out_without_swipe_to_dismiss() {
    let mut config = config(2);
    config.swipe_to_dismiss = false;
    let mut f = Fixture::with_config(config);
    f.lightbox.open();
    f.settle();
    f.events();

    let tap = f.tap_at(50., 60.);
    assert!(!f.lightbox.on_touch_end(tap));
    f.advance(120);
    let tap = f.tap_at(52., 61.);
    assert!(f.lightbox.on_touch_end(tap));

    assert_eq!(
        f.events(),
        vec![HostEvent::ZoomTo {
            slide: 0,
            rect: Rect::new(-4948., -4939., 10000., 10000.),
            animated: true,
        }]
    );
}

#[test]
fn plain_taps_ignored_with_swipe_to_dismiss() {
    let mut f = Fixture::opened(1);

    let tap = f.tap_at(50., 60.);
    assert!(!f.lightbox.on_touch_end(tap));
    let tap = f.tap_at(50., 60.);
    assert!(!f.lightbox.on_touch_end(tap));
    assert!(f.lightbox.state().last_tap.is_none());
}
