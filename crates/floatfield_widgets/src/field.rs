//! Floating-label text field
//!
//! The control ties the pieces together:
//! - An edit-session FSM driven by focus and blur
//! - The state resolver, rerun on every setter and lifecycle hook
//! - Validation at the end of each edit session, surfaced through `validate()`
//! - A render plan whose title, error and success layers are pushed to an
//!   [`AnimationPort`] whenever their target alpha or frame changes
//!
//! Every mutation funnels into a single recompute pass, so the plan returned
//! by [`FloatingTextField::render_plan`] always reflects the current inputs.

use floatfield_animation::{
    AnimationPort, CompletionCallback, ImmediatePort, LayerState, LayerTransition,
};
use floatfield_core::events::{event_types, Event, EventData};
use floatfield_core::fsm::StateMachine;
use floatfield_core::{Rect, Size};

use crate::config::FieldConfig;
use crate::focus::{FocusHost, GrantingFocus};
use crate::planner::{self, RenderPlan};
use crate::state::{self, DerivedState, FieldContent, InteractionFlags, ValidationState};
use crate::validation::{validate_on_edit_end, RuleSet};

/// Edit session states
pub mod states {
    pub const IDLE: u32 = 0;
    pub const EDITING: u32 = 1;
}

/// Animated sub-layers of a field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldLayer {
    Title,
    ErrorLabel,
    SuccessIndicator,
}

/// Formats the title and error label texts
pub type TitleFormatter = Box<dyn Fn(&str) -> String + Send>;

/// Default title formatter
pub fn uppercase(text: &str) -> String {
    text.to_uppercase()
}

/// Inline placeholder set aside while an edit session shows an empty one
#[derive(Debug, Default)]
enum PlaceholderStash {
    #[default]
    Empty,
    Stashed(Option<String>),
}

/// Floating-label text field
pub struct FloatingTextField<P = ImmediatePort<FieldLayer>> {
    config: FieldConfig,
    content: FieldContent,
    /// `focused` is taken from the session FSM on every pass
    flags: InteractionFlags,
    session: StateMachine,
    rules: Option<RuleSet>,
    validation: ValidationState,
    immediate_validation: bool,
    placeholder_stash: PlaceholderStash,
    /// Unformatted title text of the last pass
    last_title_text: Option<String>,
    title_formatter: TitleFormatter,
    focus: Box<dyn FocusHost + Send>,
    bounds: Rect,
    port: P,
    derived: DerivedState,
    plan: RenderPlan,
}

impl FloatingTextField {
    /// Create a field whose transitions complete synchronously
    pub fn new(config: FieldConfig) -> Self {
        Self::with_port(config, ImmediatePort::new())
    }
}

impl<P: AnimationPort<FieldLayer>> FloatingTextField<P> {
    /// Create a field that submits its transitions to `port`
    pub fn with_port(config: FieldConfig, port: P) -> Self {
        let derived = DerivedState::default();
        let plan = planner::plan(Rect::ZERO, &derived, &config);
        let mut field = Self {
            config,
            content: FieldContent::default(),
            flags: InteractionFlags::default(),
            session: Self::create_session(),
            rules: None,
            validation: ValidationState::Unknown,
            immediate_validation: false,
            placeholder_stash: PlaceholderStash::Empty,
            last_title_text: None,
            title_formatter: Box::new(uppercase),
            focus: Box::new(GrantingFocus),
            bounds: Rect::ZERO,
            port,
            derived,
            plan,
        };
        field.present();
        field
    }

    fn create_session() -> StateMachine {
        StateMachine::builder(states::IDLE)
            .on(states::IDLE, event_types::FOCUS, states::EDITING)
            .on(states::EDITING, event_types::BLUR, states::IDLE)
            .build()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn text(&self) -> Option<&str> {
        self.content.text.as_deref()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.content.placeholder.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.content.title.as_deref()
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.content.selected_title.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.content.error_message.as_deref()
    }

    pub fn is_selected(&self) -> bool {
        self.flags.selected
    }

    pub fn is_highlighted(&self) -> bool {
        self.flags.highlighted
    }

    /// Whether an edit session is in progress
    pub fn is_editing(&self) -> bool {
        self.session.is_in(states::EDITING)
    }

    pub fn is_title_visible(&self) -> bool {
        self.derived.is_title_visible
    }

    pub fn is_error_visible(&self) -> bool {
        self.derived.has_error_message
    }

    pub fn is_success_visible(&self) -> bool {
        self.derived.is_success_visible
    }

    pub fn is_immediate_validation(&self) -> bool {
        self.immediate_validation
    }

    pub fn rules(&self) -> Option<&RuleSet> {
        self.rules.as_ref()
    }

    /// Outcome of the last rule evaluation
    pub fn validation_state(&self) -> &ValidationState {
        &self.validation
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn derived_state(&self) -> &DerivedState {
        &self.derived
    }

    pub fn render_plan(&self) -> &RenderPlan {
        &self.plan
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Preferred size: title row plus text row
    pub fn intrinsic_content_size(&self) -> Size {
        Size::new(
            self.bounds.width,
            self.config.title_height() + self.config.text_height(),
        )
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Replace the text; the cached validation outcome is discarded
    pub fn set_text(&mut self, text: Option<String>) {
        self.content.text = text;
        self.validation = ValidationState::Unknown;
        self.recompute(false);
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        match &mut self.placeholder_stash {
            PlaceholderStash::Stashed(stashed) => *stashed = placeholder,
            PlaceholderStash::Empty => self.content.placeholder = placeholder,
        }
        self.recompute(false);
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.content.title = title;
        self.recompute(false);
    }

    pub fn set_selected_title(&mut self, selected_title: Option<String>) {
        self.content.selected_title = selected_title;
        self.recompute(false);
    }

    /// Show or clear an error; a non-empty message hides the success indicator
    pub fn set_error_message(&mut self, message: Option<String>) {
        if message.as_deref().is_some_and(|m| !m.is_empty()) {
            self.flags.success_revealed = false;
        }
        self.content.error_message = message;
        self.recompute(true);
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.flags.selected = selected;
        self.recompute(true);
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.flags.highlighted = highlighted;
        self.recompute(false);
    }

    /// Replace the rules; the cached validation outcome is discarded
    pub fn set_rules(&mut self, rules: Option<RuleSet>) {
        self.rules = rules;
        self.validation = ValidationState::Unknown;
        self.recompute(false);
    }

    pub fn set_immediate_validation(&mut self, immediate: bool) {
        self.immediate_validation = immediate;
        self.recompute(false);
    }

    pub fn set_config(&mut self, config: FieldConfig) {
        self.config = config;
        self.recompute(false);
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.recompute(false);
    }

    pub fn set_focus_host(&mut self, host: impl FocusHost + Send + 'static) {
        self.focus = Box::new(host);
    }

    pub fn set_title_formatter<F>(&mut self, formatter: F)
    where
        F: Fn(&str) -> String + Send + 'static,
    {
        self.title_formatter = Box::new(formatter);
        self.recompute(false);
    }

    /// Pin the title visible (or release the pin).
    ///
    /// `on_complete` runs exactly once: when the title transition finishes or
    /// is superseded, or right away when nothing had to move.
    pub fn set_title_visible(
        &mut self,
        visible: bool,
        animated: bool,
        on_complete: Option<CompletionCallback>,
    ) {
        self.flags.title_pinned = visible;
        self.recompute_with(animated, on_complete);
    }

    /// Lay the field out in its editing geometry for design-time previews
    pub fn prepare_for_preview(&mut self) {
        self.flags.selected = true;
        self.flags.preview = true;
        self.recompute(false);
    }

    // =========================================================================
    // Focus and lifecycle
    // =========================================================================

    /// Ask the host for focus and begin an edit session when granted
    pub fn become_first_responder(&mut self) -> bool {
        let granted = self.focus.become_first_responder();
        if granted {
            self.on_editing_begin();
        } else {
            self.recompute(true);
        }
        granted
    }

    /// Ask the host to drop focus; focus loss is handled when released
    pub fn resign_first_responder(&mut self) -> bool {
        let released = self.focus.resign_first_responder();
        if released {
            self.on_editing_end();
        } else {
            self.recompute(true);
        }
        released
    }

    /// An edit session began: pin the title and clear the inline placeholder
    pub fn on_editing_begin(&mut self) {
        if !self.session.can_send(event_types::FOCUS) {
            return;
        }
        self.session.send(event_types::FOCUS);
        self.flags.title_pinned = true;
        if let PlaceholderStash::Empty = self.placeholder_stash {
            let placeholder = self.content.placeholder.replace(String::new());
            self.placeholder_stash = PlaceholderStash::Stashed(placeholder);
        }
        tracing::debug!("edit session began");
        self.recompute(true);
    }

    /// The text changed during an edit session; validation does not run
    pub fn on_editing_changed(&mut self) {
        self.recompute(true);
    }

    /// Keystroke from the host's text input source
    pub fn on_text_input(&mut self, text: impl Into<String>) {
        self.content.text = Some(text.into());
        self.on_editing_changed();
    }

    /// Focus was lost: evaluate the rules if an edit session ended, and
    /// release the title of an empty field
    pub fn on_editing_end(&mut self) {
        if self.session.can_send(event_types::BLUR) {
            self.session.send(event_types::BLUR);

            let outcome =
                validate_on_edit_end(self.content.text.as_deref(), self.rules.as_ref());
            tracing::debug!(passed = outcome.passed, "edit session ended");
            if self.immediate_validation {
                self.flags.success_revealed = outcome.passed;
                if outcome.passed {
                    self.content.error_message = None;
                }
            }
            self.validation = outcome.into();
        }

        self.release_placeholder();
        self.recompute(true);
    }

    fn release_placeholder(&mut self) {
        let stash = std::mem::take(&mut self.placeholder_stash);
        if self.content.has_text() {
            if let PlaceholderStash::Stashed(placeholder) = stash {
                self.content.placeholder = placeholder;
            }
        } else {
            self.content.placeholder = self.last_title_text.clone();
            self.flags.title_pinned = false;
        }
    }

    /// Surface the validation outcome.
    ///
    /// A pass reveals the success indicator and clears the error message; a
    /// failure shows the first failing rule's message. Rules are evaluated on
    /// the spot when no outcome is cached.
    pub fn validate(&mut self) -> bool {
        if self.validation == ValidationState::Unknown {
            self.validation =
                validate_on_edit_end(self.content.text.as_deref(), self.rules.as_ref()).into();
        }

        let passed = match &self.validation {
            ValidationState::Failed { message } => {
                self.content.error_message = Some(message.clone());
                self.flags.success_revealed = false;
                false
            }
            _ => {
                self.content.error_message = None;
                self.flags.success_revealed = true;
                true
            }
        };
        tracing::debug!(passed, "validate");
        self.recompute(true);
        passed
    }

    /// Route a raw host event to the matching hook
    pub fn handle_event(&mut self, event: &Event) {
        match (event.event_type, &event.data) {
            (event_types::FOCUS, _) => self.on_editing_begin(),
            (event_types::TEXT_INPUT, EventData::TextInput { text }) => {
                self.on_text_input(text.clone())
            }
            (event_types::BLUR, _) => self.on_editing_end(),
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                let bounds = Rect::new(self.bounds.x, self.bounds.y, *width, *height);
                self.set_bounds(bounds);
            }
            _ => tracing::trace!(event_type = event.event_type, "ignored event"),
        }
    }

    // =========================================================================
    // Recompute
    // =========================================================================

    fn resolve(&self) -> DerivedState {
        let flags = InteractionFlags {
            focused: self.is_editing(),
            ..self.flags
        };
        match &self.placeholder_stash {
            PlaceholderStash::Stashed(placeholder) => {
                let content = FieldContent {
                    placeholder: placeholder.clone(),
                    ..self.content.clone()
                };
                state::resolve(&content, flags, &self.validation)
            }
            PlaceholderStash::Empty => state::resolve(&self.content, flags, &self.validation),
        }
    }

    fn recompute(&mut self, animated: bool) {
        self.recompute_with(animated, None);
    }

    fn recompute_with(&mut self, animated: bool, on_complete: Option<CompletionCallback>) {
        let mut derived = self.resolve();
        derived.format_labels(&*self.title_formatter);
        self.last_title_text = derived.title_text.clone();

        let plan = planner::plan(self.bounds, &derived, &self.config);
        let previous = std::mem::replace(&mut self.plan, plan);
        self.derived = derived;

        let label_duration = if self.derived.is_title_visible {
            self.config.title_fade_in
        } else {
            self.config.title_fade_out
        };
        let success_duration = if self.derived.is_success_visible {
            self.config.title_fade_in
        } else {
            self.config.title_fade_out
        };

        let mut on_complete = on_complete;
        for ((layer, from), (_, to)) in layers(&previous).into_iter().zip(layers(&self.plan)) {
            if from == to {
                continue;
            }
            let completion = if layer == FieldLayer::Title {
                on_complete.take()
            } else {
                None
            };
            if animated {
                let duration = match layer {
                    FieldLayer::SuccessIndicator => success_duration,
                    _ => label_duration,
                };
                tracing::debug!(?layer, alpha = to.alpha, ?duration, "animating layer");
                let mut transition = LayerTransition::new(to.frame, to.alpha, duration);
                transition.on_complete = completion;
                self.port.animate(layer, transition);
            } else {
                self.port.apply(layer, to.frame, to.alpha);
                if let Some(callback) = completion {
                    callback(true);
                }
            }
        }

        if let Some(callback) = on_complete {
            callback(true);
        }
    }

    /// Recompute and push every layer synchronously
    fn present(&mut self) {
        self.recompute(false);
        for (layer, target) in layers(&self.plan) {
            self.port.apply(layer, target.frame, target.alpha);
        }
    }
}

fn layers(plan: &RenderPlan) -> [(FieldLayer, LayerState); 3] {
    [
        (
            FieldLayer::Title,
            LayerState::new(plan.title.frame, plan.title.alpha),
        ),
        (
            FieldLayer::ErrorLabel,
            LayerState::new(plan.error.frame, plan.error.alpha),
        ),
        (
            FieldLayer::SuccessIndicator,
            LayerState::new(plan.success.frame, plan.success.alpha),
        ),
    ]
}

// =============================================================================
// Builder
// =============================================================================

/// Start building a floating text field
pub fn floating_text_field() -> FloatingTextFieldBuilder {
    FloatingTextFieldBuilder::default()
}

/// Builder for floating text fields
#[derive(Default)]
pub struct FloatingTextFieldBuilder {
    config: FieldConfig,
    content: FieldContent,
    bounds: Rect,
    rules: Option<RuleSet>,
    immediate_validation: bool,
    focus: Option<Box<dyn FocusHost + Send>>,
    title_formatter: Option<TitleFormatter>,
}

impl FloatingTextFieldBuilder {
    pub fn config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content.text = Some(text.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.content.placeholder = Some(placeholder.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.content.title = Some(title.into());
        self
    }

    pub fn selected_title(mut self, selected_title: impl Into<String>) -> Self {
        self.content.selected_title = Some(selected_title.into());
        self
    }

    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn immediate_validation(mut self, immediate: bool) -> Self {
        self.immediate_validation = immediate;
        self
    }

    pub fn focus_host(mut self, host: impl FocusHost + Send + 'static) -> Self {
        self.focus = Some(Box::new(host));
        self
    }

    pub fn title_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str) -> String + Send + 'static,
    {
        self.title_formatter = Some(Box::new(formatter));
        self
    }

    /// Build a field whose transitions complete synchronously
    pub fn build(self) -> FloatingTextField {
        self.build_with_port(ImmediatePort::new())
    }

    /// Build a field that submits its transitions to `port`
    pub fn build_with_port<P: AnimationPort<FieldLayer>>(self, port: P) -> FloatingTextField<P> {
        let mut field = FloatingTextField::with_port(self.config, port);
        field.content = self.content;
        field.bounds = self.bounds;
        field.rules = self.rules;
        field.immediate_validation = self.immediate_validation;
        if let Some(focus) = self.focus {
            field.focus = focus;
        }
        if let Some(formatter) = self.title_formatter {
            field.title_formatter = formatter;
        }
        field.present();
        field
    }
}
