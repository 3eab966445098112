//! Integration tests for transition retargeting
//!
//! These tests verify that:
//! - A new request for a layer supersedes the in-flight one (last writer wins)
//! - The superseding transition starts from the currently presented values
//! - Every request's completion fires exactly once

use std::sync::{Arc, Mutex};
use std::time::Duration;

use floatfield_animation::{AnimationPort, Easing, LayerTransition, TransitionScheduler};
use floatfield_core::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Layer {
    Title,
    Error,
}

fn recorder() -> (Arc<Mutex<Vec<(&'static str, bool)>>>, impl Fn(&'static str) -> Box<dyn FnOnce(bool) + Send>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();
    let make = move |name: &'static str| {
        let log = log_clone.clone();
        Box::new(move |finished: bool| log.lock().unwrap().push((name, finished)))
            as Box<dyn FnOnce(bool) + Send>
    };
    (log, make)
}

#[test]
fn test_retarget_continues_from_presented_alpha() {
    let resting = Rect::new(0.0, 15.0, 200.0, 15.0);
    let floated = Rect::new(0.0, 0.0, 200.0, 15.0);
    let mut scheduler = TransitionScheduler::new();
    scheduler.apply(Layer::Title, resting, 0.0);

    let (log, make) = recorder();

    let mut fade_in = LayerTransition::new(floated, 1.0, Duration::from_millis(200)).easing(Easing::Linear);
    fade_in.on_complete = Some(make("fade_in"));
    scheduler.animate(Layer::Title, fade_in);
    scheduler.tick(0.1);

    let mid = scheduler.presentation(Layer::Title).unwrap();
    assert!((mid.alpha - 0.5).abs() < 1e-4);
    assert!((mid.frame.y - 7.5).abs() < 1e-4);

    // Blur arrives before the fade-in finished
    let mut fade_out = LayerTransition::new(resting, 0.0, Duration::from_millis(300)).easing(Easing::Linear);
    fade_out.on_complete = Some(make("fade_out"));
    scheduler.animate(Layer::Title, fade_out);

    assert_eq!(*log.lock().unwrap(), vec![("fade_in", false)]);
    assert_eq!(scheduler.target(Layer::Title).unwrap().alpha, 0.0);

    scheduler.tick(0.15);
    let partway = scheduler.presentation(Layer::Title).unwrap();
    assert!((partway.alpha - 0.25).abs() < 1e-4);

    scheduler.tick(0.2);
    let settled = scheduler.presentation(Layer::Title).unwrap();
    assert_eq!(settled.alpha, 0.0);
    assert_eq!(settled.frame, resting);
    assert_eq!(
        *log.lock().unwrap(),
        vec![("fade_in", false), ("fade_out", true)]
    );
}

#[test]
fn test_layers_animate_independently() {
    let frame = Rect::new(0.0, 45.0, 200.0, 15.0);
    let mut scheduler = TransitionScheduler::new();

    scheduler.animate(Layer::Title, LayerTransition::new(frame, 1.0, Duration::from_millis(200)));
    scheduler.animate(Layer::Error, LayerTransition::new(frame, 1.0, Duration::from_millis(300)));
    assert_eq!(scheduler.active_count(), 2);

    scheduler.tick(0.25);
    assert!(!scheduler.is_animating(Layer::Title));
    assert!(scheduler.is_animating(Layer::Error));

    scheduler.tick(0.1);
    assert!(!scheduler.has_active_transitions());
    assert_eq!(scheduler.presentation(Layer::Error).unwrap().alpha, 1.0);
}
