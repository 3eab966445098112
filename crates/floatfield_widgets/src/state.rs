//! State resolver
//!
//! Derives the booleans and label texts a field renders from its raw inputs.
//! Everything here is a pure function of its arguments: the same content,
//! flags and validation state always resolve to the same [`DerivedState`].

/// Text content of a field
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldContent {
    pub text: Option<String>,
    /// Shown inline while the field is empty
    pub placeholder: Option<String>,
    /// Title shown while not editing
    pub title: Option<String>,
    /// Title shown while editing or selected
    pub selected_title: Option<String>,
    pub error_message: Option<String>,
}

impl FieldContent {
    pub fn has_text(&self) -> bool {
        non_empty(self.text.as_deref())
    }

    pub fn has_error_message(&self) -> bool {
        non_empty(self.error_message.as_deref())
    }

    /// `title`, else `placeholder`
    pub fn title_or_placeholder(&self) -> Option<&str> {
        self.title.as_deref().or(self.placeholder.as_deref())
    }

    /// `selected_title`, else `title`, else `placeholder`
    pub fn selected_title_or_fallback(&self) -> Option<&str> {
        self.selected_title
            .as_deref()
            .or_else(|| self.title_or_placeholder())
    }
}

fn non_empty(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.is_empty())
}

/// Interaction flags owned by the control
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionFlags {
    /// An edit session is active
    pub focused: bool,
    /// Host-controlled selection; floats the title like focus does
    pub selected: bool,
    pub highlighted: bool,
    /// Keeps the title visible while the field is empty
    pub title_pinned: bool,
    /// The success indicator was revealed by a passing validation
    pub success_revealed: bool,
    /// Lay out every element in its editing geometry (design-tool preview)
    pub preview: bool,
}

/// Outcome of the last rule evaluation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ValidationState {
    /// Not evaluated since the text or rules last changed
    #[default]
    Unknown,
    Passed,
    /// Carries the message of the first failing rule
    Failed { message: String },
}

impl ValidationState {
    pub fn is_passed(&self) -> Option<bool> {
        match self {
            ValidationState::Unknown => None,
            ValidationState::Passed => Some(true),
            ValidationState::Failed { .. } => Some(false),
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ValidationState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Per-pass derived state; recomputed on every triggering event
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivedState {
    pub has_text: bool,
    pub is_focused: bool,
    pub is_editing_or_selected: bool,
    pub is_highlighted: bool,
    pub has_error_message: bool,
    pub is_title_visible: bool,
    /// Never true while an error message is shown
    pub is_success_visible: bool,
    pub is_preview: bool,
    pub is_validation_passed: Option<bool>,
    pub cached_failure_message: Option<String>,
    /// Text for the title label; `None` renders nothing
    pub title_text: Option<String>,
    /// Text for the error label; `None` unless an error message is set
    pub error_text: Option<String>,
}

impl DerivedState {
    /// Focused or holding text
    pub fn is_active(&self) -> bool {
        self.is_focused || self.has_text
    }

    /// Run both label texts through a formatter
    pub fn format_labels(&mut self, formatter: &dyn Fn(&str) -> String) {
        self.title_text = self.title_text.as_deref().map(formatter);
        self.error_text = self.error_text.as_deref().map(formatter);
    }
}

/// Resolve the derived state of a field
pub fn resolve(
    content: &FieldContent,
    flags: InteractionFlags,
    validation: &ValidationState,
) -> DerivedState {
    let has_text = content.has_text();
    let is_editing_or_selected = flags.focused || flags.selected;
    let has_error_message = content.has_error_message();

    let title_text = if is_editing_or_selected {
        content.selected_title_or_fallback()
    } else {
        content.title_or_placeholder()
    };

    let error_text = if has_error_message {
        content.error_message.clone()
    } else {
        None
    };

    DerivedState {
        has_text,
        is_focused: flags.focused,
        is_editing_or_selected,
        is_highlighted: flags.highlighted,
        has_error_message,
        is_title_visible: has_text || flags.title_pinned,
        is_success_visible: flags.success_revealed && !has_error_message,
        is_preview: flags.preview,
        is_validation_passed: validation.is_passed(),
        cached_failure_message: validation.failure_message().map(str::to_string),
        title_text: title_text.map(str::to_string),
        error_text,
    }
}
