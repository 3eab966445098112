//! Geometry and render planning
//!
//! Turns a resolved [`DerivedState`] and the control bounds into frames,
//! colors, texts and alpha targets for every sub-element of a field.
//!
//! Vertical layout, with `t` the title height and `h` the bounds height:
//!
//! ```text
//! 0      title (floated)
//! t      title (resting) / text rect / border overlay
//! h-2t   error label (title hidden)
//! h-t    underline
//! h-t+2  error label (title visible)
//! ```

use floatfield_core::{Color, Rect};

use crate::config::{FieldConfig, UnderlineStyle};
use crate::state::DerivedState;

/// A text label: title or error
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlan {
    pub frame: Rect,
    pub color: Color,
    pub text: Option<String>,
    /// Target alpha, 0.0 or 1.0
    pub alpha: f32,
}

impl LabelPlan {
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePlan {
    pub frame: Rect,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderPlan {
    pub frame: Rect,
    pub stroke: Color,
    pub fill: Color,
    pub width: f32,
}

/// Editable text and inline placeholder
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextPlan {
    /// Shared by text, editing text and placeholder
    pub frame: Rect,
    /// `None` leaves the host's text color in place
    pub color: Option<Color>,
    pub placeholder_color: Color,
    pub placeholder_font_size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorPlan {
    pub frame: Rect,
    pub color: Color,
    pub alpha: f32,
}

/// Everything a host needs to draw one frame of a field
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub title: LabelPlan,
    pub error: LabelPlan,
    pub underline: LinePlan,
    pub border: BorderPlan,
    pub text: TextPlan,
    pub success: IndicatorPlan,
}

/// Underline rectangle; thicker while editing in the `Thickness` style
pub fn underline_rect(bounds: Rect, editing: bool, config: &FieldConfig) -> Rect {
    let height = match config.underline_style {
        UnderlineStyle::Thickness if editing => config.selected_line_height,
        _ => config.line_height,
    };
    Rect::new(
        0.0,
        bounds.height - config.title_height(),
        bounds.width,
        height,
    )
}

/// Text, editing and placeholder rectangle
pub fn text_rect(bounds: Rect, underline_height: f32, config: &FieldConfig) -> Rect {
    let t = config.title_height();
    Rect::new(
        bounds.x,
        t,
        bounds.width,
        (bounds.height - 2.0 * t - underline_height).max(0.0),
    )
}

/// Title label rectangle: floated to the top when visible, resting one row down otherwise
pub fn title_rect(bounds: Rect, visible: bool, config: &FieldConfig) -> Rect {
    let t = config.title_height();
    let y = if visible { 0.0 } else { t };
    Rect::new(0.0, y, bounds.width, t)
}

/// Error label rectangle: below the underline when the title is up, above it otherwise
pub fn error_rect(bounds: Rect, title_visible: bool, config: &FieldConfig) -> Rect {
    let t = config.title_height();
    let y = if title_visible {
        bounds.height - t + 2.0
    } else {
        bounds.height - 2.0 * t
    };
    Rect::new(0.0, y, bounds.width, t)
}

/// Border overlay rectangle
pub fn border_rect(bounds: Rect, underline_height: f32, config: &FieldConfig) -> Rect {
    let t = config.title_height();
    Rect::new(
        bounds.x,
        t,
        bounds.width,
        (bounds.height - 2.0 * t - underline_height).max(0.0),
    )
}

/// Square at the trailing edge of the text rect, vertically centered
fn success_rect(text: Rect, config: &FieldConfig) -> Rect {
    let side = config.title_height();
    Rect::new(
        text.max_x() - side,
        text.y + (text.height - side) / 2.0,
        side,
        side,
    )
}

/// Pick a color by state priority: error, then active, then idle
fn by_priority(state: &DerivedState, error: Color, active: Color, idle: Color) -> Color {
    if state.has_error_message {
        error
    } else if state.is_active() {
        active
    } else {
        idle
    }
}

fn underline_color(state: &DerivedState, config: &FieldConfig) -> Color {
    if state.has_error_message {
        return config.error_color;
    }
    match config.underline_style {
        UnderlineStyle::Thickness if state.is_editing_or_selected => config.selected_line_color,
        UnderlineStyle::Thickness => config.line_color,
        UnderlineStyle::Fade if state.is_active() => Color::TRANSPARENT,
        UnderlineStyle::Fade => config.line_color,
    }
}

fn alpha(visible: bool) -> f32 {
    if visible {
        1.0
    } else {
        0.0
    }
}

/// Plan every sub-element of a field
pub fn plan(bounds: Rect, state: &DerivedState, config: &FieldConfig) -> RenderPlan {
    let editing_layout = state.is_editing_or_selected || state.is_preview;
    let title_layout = state.is_title_visible || state.is_preview;

    let underline = LinePlan {
        frame: underline_rect(bounds, editing_layout, config),
        color: underline_color(state, config),
    };
    let underline_height = underline.frame.height;

    let title_color = if state.is_editing_or_selected || state.is_highlighted {
        config.selected_title_color
    } else {
        config.title_color
    };

    let title = LabelPlan {
        frame: title_rect(bounds, title_layout, config),
        color: title_color,
        text: state.title_text.clone(),
        alpha: alpha(state.is_title_visible),
    };

    let error = LabelPlan {
        frame: error_rect(bounds, title_layout, config),
        color: config.error_color,
        text: state.error_text.clone(),
        alpha: alpha(state.has_error_message),
    };

    let border = BorderPlan {
        frame: border_rect(bounds, underline_height, config),
        stroke: by_priority(
            state,
            config.error_color,
            config.active_border_color,
            config.inactive_border_color,
        ),
        fill: by_priority(
            state,
            config.error_background_color,
            config.active_background_color,
            config.inactive_background_color,
        ),
        width: config.border_size,
    };

    let text = TextPlan {
        frame: text_rect(bounds, underline_height, config),
        color: if state.has_error_message {
            Some(config.error_color)
        } else {
            config.text_color
        },
        placeholder_color: config.placeholder_color,
        placeholder_font_size: config.placeholder_font_size(),
    };

    let success = IndicatorPlan {
        frame: success_rect(text.frame, config),
        color: config.success_color,
        alpha: alpha(state.is_success_visible),
    };

    RenderPlan {
        title,
        error,
        underline,
        border,
        text,
        success,
    }
}
