//! Integration tests for the floating text field lifecycle
//!
//! These tests drive a field the way a host would (focus, keystrokes, blur,
//! explicit validation) and observe it through its render plan, a recording
//! animation port and a scripted focus host.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use floatfield_animation::{AnimationPort, LayerState, LayerTransition, TransitionScheduler};
use floatfield_core::{Color, Event, Rect};
use floatfield_widgets::prelude::*;
use floatfield_widgets::{FieldConfig, FloatingTextField, GrantingFocus, ValidationState};

const EMAIL: &str = r"[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}";

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 200.0, 60.0)
}

fn email_rules() -> RuleSet {
    RuleSet::new([ValidationRule::new(EMAIL, "Email not valid")])
}

fn email_field() -> FloatingTextField {
    floating_text_field()
        .bounds(bounds())
        .title("Email")
        .placeholder("Email")
        .rules(email_rules())
        .build()
}

/// Port that completes every transition on submission and records it
#[derive(Default)]
struct RecordingPort {
    animated: Vec<(FieldLayer, f32, Duration)>,
    applied: Vec<(FieldLayer, f32)>,
    layers: HashMap<FieldLayer, LayerState>,
}

impl RecordingPort {
    fn animated_alphas(&self, layer: FieldLayer) -> Vec<(f32, Duration)> {
        self.animated
            .iter()
            .filter(|(l, _, _)| *l == layer)
            .map(|(_, alpha, duration)| (*alpha, *duration))
            .collect()
    }

    fn clear(&mut self) {
        self.animated.clear();
        self.applied.clear();
    }
}

impl AnimationPort<FieldLayer> for RecordingPort {
    fn apply(&mut self, layer: FieldLayer, frame: Rect, alpha: f32) {
        self.applied.push((layer, alpha));
        self.layers.insert(layer, LayerState::new(frame, alpha));
    }

    fn animate(&mut self, layer: FieldLayer, transition: LayerTransition) {
        self.animated
            .push((layer, transition.target_alpha, transition.duration));
        self.layers.insert(layer, transition.target());
        transition.complete(true);
    }

    fn presentation(&self, layer: FieldLayer) -> Option<LayerState> {
        self.layers.get(&layer).copied()
    }
}

/// Focus host whose answers are scripted by the test
#[derive(Clone, Default)]
struct ScriptedFocus {
    deny: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
}

impl FocusHost for ScriptedFocus {
    fn become_first_responder(&mut self) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        !self.deny.load(Ordering::SeqCst)
    }

    fn resign_first_responder(&mut self) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        !self.deny.load(Ordering::SeqCst)
    }
}

type Log = Arc<Mutex<Vec<(&'static str, bool)>>>;

fn completion(log: &Log, name: &'static str) -> Option<Box<dyn FnOnce(bool) + Send>> {
    let log = log.clone();
    Some(Box::new(move |finished| {
        log.lock().unwrap().push((name, finished))
    }))
}

#[test]
fn test_text_rect_geometry_in_both_sessions() {
    let mut field = email_field();
    assert_eq!(
        field.render_plan().text.frame,
        Rect::new(0.0, 15.0, 200.0, 29.0)
    );

    field.become_first_responder();
    assert_eq!(
        field.render_plan().text.frame,
        Rect::new(0.0, 15.0, 200.0, 28.0)
    );
}

#[test]
fn test_email_end_to_end() {
    let mut field = email_field();

    field.become_first_responder();
    field.on_text_input("not-an-email");
    field.resign_first_responder();

    assert!(!field.validate());
    assert_eq!(field.error_message(), Some("Email not valid"));
    assert!(field.is_error_visible());
    assert!(!field.is_success_visible());
    assert_eq!(
        field.render_plan().error.text.as_deref(),
        Some("EMAIL NOT VALID")
    );

    field.become_first_responder();
    field.on_text_input("user@example.com");
    field.resign_first_responder();

    assert!(field.validate());
    assert_eq!(field.error_message(), None);
    assert!(field.is_success_visible());
    assert_eq!(field.render_plan().success.alpha, 1.0);
}

#[test]
fn test_validation_waits_for_edit_end() {
    let mut field = email_field();
    field.handle_event(&Event::focus());
    field.handle_event(&Event::text_input("user@example.com"));

    // Keystrokes never evaluate rules
    assert_eq!(*field.validation_state(), ValidationState::Unknown);
    assert!(field.is_title_visible());

    field.handle_event(&Event::blur());
    assert_eq!(*field.validation_state(), ValidationState::Passed);
    assert!(!field.is_editing());
}

#[test]
fn test_focus_loss_while_empty_releases_title() {
    let mut field = floating_text_field()
        .bounds(bounds())
        .title("Email")
        .selected_title("Your email")
        .placeholder("name@example.com")
        .build();
    field.set_text(Some(String::new()));
    field.set_title_visible(true, false, None);
    assert!(field.is_title_visible());

    field.handle_event(&Event::focus());
    assert_eq!(field.placeholder(), Some(""));
    assert_eq!(field.render_plan().title.text.as_deref(), Some("YOUR EMAIL"));

    field.handle_event(&Event::blur());
    assert!(!field.is_title_visible());
    // The placeholder takes the title text as it was shown
    assert_eq!(field.placeholder(), Some("YOUR EMAIL"));
    assert_eq!(field.render_plan().title.alpha, 0.0);
}

#[test]
fn test_blur_without_session_still_releases_pin() {
    let mut field = email_field();
    field.set_title_visible(true, false, None);
    assert!(field.is_title_visible());

    field.handle_event(&Event::blur());
    assert!(!field.is_title_visible());
    assert_eq!(field.placeholder(), Some("EMAIL"));
    // No edit session ended, so nothing was evaluated
    assert_eq!(*field.validation_state(), ValidationState::Unknown);
}

#[test]
fn test_error_round_trip_restores_colors() {
    let config = FieldConfig {
        active_border_color: Color::WHITE,
        inactive_border_color: Color::GRAY,
        ..Default::default()
    };
    let mut field = floating_text_field()
        .config(config.clone())
        .bounds(bounds())
        .title("Email")
        .build();

    let before = field.render_plan().clone();

    field.set_error_message(Some("X".into()));
    assert!(field.derived_state().has_error_message);
    let erroring = field.render_plan();
    assert_eq!(erroring.border.stroke, config.error_color);
    assert_eq!(erroring.underline.color, config.error_color);
    assert_eq!(erroring.text.color, Some(config.error_color));

    field.set_error_message(None);
    assert!(!field.derived_state().has_error_message);
    let after = field.render_plan();
    assert_eq!(after.border.stroke, before.border.stroke);
    assert_eq!(after.border.fill, before.border.fill);
    assert_eq!(after.underline.color, before.underline.color);
    assert_eq!(after.error.alpha, 0.0);
}

#[test]
fn test_immediate_validation_reveals_success_at_edit_end() {
    let mut field = floating_text_field()
        .bounds(bounds())
        .title("Email")
        .rules(email_rules())
        .immediate_validation(true)
        .build();

    field.become_first_responder();
    field.on_text_input("user@example.com");
    field.resign_first_responder();
    assert!(field.is_success_visible());
    assert_eq!(field.error_message(), None);

    field.become_first_responder();
    field.on_text_input("nope");
    field.resign_first_responder();
    assert!(!field.is_success_visible());
    // The message still waits for an explicit validate()
    assert_eq!(field.error_message(), None);
    assert!(!field.validate());
    assert_eq!(field.error_message(), Some("Email not valid"));
}

#[test]
fn test_immediate_validation_pass_clears_stale_error() {
    let mut field = floating_text_field()
        .bounds(bounds())
        .title("Email")
        .rules(email_rules())
        .immediate_validation(true)
        .build();

    field.become_first_responder();
    field.on_text_input("nope");
    field.resign_first_responder();
    assert!(!field.validate());
    assert_eq!(field.error_message(), Some("Email not valid"));

    field.become_first_responder();
    field.on_text_input("user@example.com");
    field.resign_first_responder();
    assert_eq!(*field.validation_state(), ValidationState::Passed);
    assert_eq!(field.error_message(), None);
    assert!(!field.is_error_visible());
    assert!(field.is_success_visible());
    assert_eq!(field.render_plan().success.alpha, 1.0);
}

#[test]
fn test_success_indicator_waits_for_validate_by_default() {
    let mut field = email_field();
    field.become_first_responder();
    field.on_text_input("user@example.com");
    field.resign_first_responder();
    assert!(!field.is_success_visible());

    assert!(field.validate());
    assert!(field.is_success_visible());

    // An error message from the host hides it again
    field.set_error_message(Some("Address already taken".into()));
    assert!(!field.is_success_visible());
    assert!(field.is_error_visible());
}

#[test]
fn test_empty_rules_pass() {
    let mut field = floating_text_field()
        .bounds(bounds())
        .rules(RuleSet::new([]))
        .build();
    field.on_text_input("anything");
    assert!(field.validate());

    let mut unset = floating_text_field().bounds(bounds()).build();
    assert!(unset.validate());
}

#[test]
fn test_first_failing_rule_message_is_shown() {
    let mut field = floating_text_field()
        .bounds(bounds())
        .rules(RuleSet::new([
            ValidationRule::new("^[0-9]+$", "digits only"),
            ValidationRule::new("^.{5,}$", "min length 5"),
        ]))
        .build();
    field.become_first_responder();
    field.on_text_input("ab");
    field.resign_first_responder();

    assert_eq!(
        field.derived_state().cached_failure_message.as_deref(),
        Some("digits only")
    );
    assert!(!field.validate());
    assert_eq!(field.error_message(), Some("digits only"));
}

#[test]
fn test_malformed_rule_fails_closed_in_field() {
    let mut field = floating_text_field()
        .bounds(bounds())
        .rules(RuleSet::new([ValidationRule::new("([a-z", "broken rule")]))
        .build();
    field.on_text_input("abc");
    assert!(!field.validate());
    assert_eq!(field.error_message(), Some("broken rule"));
}

#[test]
fn test_set_title_visible_completes_exactly_once() {
    let mut field = floating_text_field()
        .bounds(bounds())
        .title("Email")
        .build_with_port(TransitionScheduler::new());
    let log: Log = Arc::default();

    field.set_title_visible(true, true, completion(&log, "show"));
    assert!(log.lock().unwrap().is_empty());
    assert!(field.port().is_animating(FieldLayer::Title));

    field.port_mut().tick(0.1);
    field.set_title_visible(false, true, completion(&log, "hide"));
    assert_eq!(*log.lock().unwrap(), vec![("show", false)]);

    field.port_mut().tick(0.5);
    assert_eq!(
        *log.lock().unwrap(),
        vec![("show", false), ("hide", true)]
    );
    let presented = field.port().presentation(FieldLayer::Title).unwrap();
    assert_eq!(presented.alpha, 0.0);
    assert_eq!(presented.frame, Rect::new(0.0, 15.0, 200.0, 15.0));

    // Nothing to move: completes right away
    field.set_title_visible(false, true, completion(&log, "noop"));
    assert_eq!(log.lock().unwrap().last(), Some(&("noop", true)));

    // Immediate path completes synchronously
    field.set_title_visible(true, false, completion(&log, "snap"));
    assert_eq!(log.lock().unwrap().last(), Some(&("snap", true)));
    assert_eq!(log.lock().unwrap().len(), 4);
    assert_eq!(field.port().presentation(FieldLayer::Title).unwrap().alpha, 1.0);
}

#[test]
fn test_title_fades_use_configured_durations() {
    let mut field = floating_text_field()
        .bounds(bounds())
        .title("Email")
        .build_with_port(RecordingPort::default());
    field.port_mut().clear();

    field.become_first_responder();
    assert_eq!(
        field.port().animated_alphas(FieldLayer::Title),
        vec![(1.0, Duration::from_millis(200))]
    );

    field.port_mut().clear();
    field.resign_first_responder();
    assert_eq!(
        field.port().animated_alphas(FieldLayer::Title),
        vec![(0.0, Duration::from_millis(300))]
    );
}

#[test]
fn test_keystrokes_do_not_resubmit_unchanged_layers() {
    let mut field = floating_text_field()
        .bounds(bounds())
        .title("Email")
        .build_with_port(RecordingPort::default());
    field.become_first_responder();
    field.port_mut().clear();

    field.on_text_input("a");
    field.on_text_input("ab");
    assert!(field.port().animated.is_empty());
    assert!(field.port().applied.is_empty());
}

#[test]
fn test_denied_focus_keeps_field_idle() {
    let focus = ScriptedFocus::default();
    let mut field = floating_text_field()
        .bounds(bounds())
        .title("Email")
        .focus_host(focus.clone())
        .build();

    focus.deny.store(true, Ordering::SeqCst);
    assert!(!field.become_first_responder());
    assert!(!field.is_editing());
    assert!(!field.is_title_visible());

    focus.deny.store(false, Ordering::SeqCst);
    assert!(field.become_first_responder());
    assert!(field.is_editing());

    focus.deny.store(true, Ordering::SeqCst);
    assert!(!field.resign_first_responder());
    assert!(field.is_editing());

    field.set_focus_host(GrantingFocus);
    assert!(field.resign_first_responder());
    assert!(!field.is_editing());
    assert_eq!(focus.requests.load(Ordering::SeqCst), 3);
}

#[test]
fn test_selected_and_highlighted_colors() {
    let config = FieldConfig::default();
    let mut field = floating_text_field()
        .bounds(bounds())
        .title("Email")
        .selected_title("Editing email")
        .build();

    assert_eq!(field.render_plan().title.color, config.title_color);

    field.set_highlighted(true);
    assert_eq!(field.render_plan().title.color, config.selected_title_color);
    field.set_highlighted(false);

    field.set_selected(true);
    let plan = field.render_plan();
    assert_eq!(plan.title.color, config.selected_title_color);
    assert_eq!(plan.title.text.as_deref(), Some("EDITING EMAIL"));
    assert_eq!(plan.underline.color, config.selected_line_color);
    // Selection alone does not float the title
    assert!(!field.is_title_visible());
}

#[test]
fn test_config_change_rerenders_without_state_change() {
    let mut field = email_field();
    field.become_first_responder();
    field.on_text_input("user@example.com");

    let mut config = field.config().clone();
    config.underline_style = UnderlineStyle::Fade;
    config.title_font = FontSpec::system(12.0).with_line_height(12.0);
    field.set_config(config);

    assert!(field.is_editing());
    assert_eq!(field.text(), Some("user@example.com"));
    let plan = field.render_plan();
    assert_eq!(plan.underline.color, Color::TRANSPARENT);
    assert_eq!(plan.underline.frame, Rect::new(0.0, 48.0, 200.0, 1.0));
    assert_eq!(plan.text.frame, Rect::new(0.0, 12.0, 200.0, 35.0));
}
