//! Field style configuration
//!
//! [`FieldConfig`] holds every style knob of a floating-label field. Changing
//! it re-renders the control but never changes its interaction state.
//!
//! Configurations can be loaded from TOML style files in which every key is
//! optional:
//!
//! ```toml
//! title_fade_in = 0.2
//! active_border_color = "#FFFFFF"
//! active_background_color = "#800080"
//! line_color = "#FF0000"
//! underline_style = "thickness"
//!
//! [title_font]
//! size = 12.0
//! line_height = 14.5
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use floatfield_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Title height used when the title font reports no line height
pub const DEFAULT_TITLE_HEIGHT: f32 = 15.0;

/// Extra vertical room added to the text font's line height
pub const TEXT_HEIGHT_PADDING: f32 = 7.0;

/// How the underline reflects focus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderlineStyle {
    /// Thicker (`selected_line_height`) and `selected_line_color` while editing
    #[default]
    Thickness,
    /// Constant `line_height`; transparent while the field has text or focus
    Fade,
}

/// Font description; only the metrics matter to layout
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: Option<String>,
    pub size: f32,
    /// Line height reported by the platform, when known
    pub line_height: Option<f32>,
}

impl FontSpec {
    pub fn system(size: f32) -> Self {
        Self {
            family: None,
            size,
            line_height: None,
        }
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }
}

/// Style knobs of a floating-label field
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Duration of the title/error appearing transition
    pub title_fade_in: Duration,
    /// Duration of the title/error disappearing transition
    pub title_fade_out: Duration,

    /// Stroke width of the border overlay
    pub border_size: f32,
    /// Border stroke while focused or non-empty
    pub active_border_color: Color,
    /// Border stroke while idle and empty
    pub inactive_border_color: Color,
    /// Border fill while focused or non-empty
    pub active_background_color: Color,
    /// Border fill while idle and empty
    pub inactive_background_color: Color,
    /// Border fill while an error message is shown
    pub error_background_color: Color,

    pub placeholder_color: Color,
    /// Explicit placeholder font; falls back to the scaled text font
    pub placeholder_font: Option<FontSpec>,
    /// Placeholder size relative to the text font
    pub placeholder_font_scale: f32,

    /// Font of the editable text
    pub font: FontSpec,
    /// Editable text color; `None` leaves it to the host
    pub text_color: Option<Color>,

    pub title_font: FontSpec,
    pub title_color: Color,
    pub selected_title_color: Color,

    pub line_color: Color,
    pub selected_line_color: Color,
    pub line_height: f32,
    pub selected_line_height: f32,
    pub underline_style: UnderlineStyle,

    /// Title, line, text and error label color while an error is shown
    pub error_color: Color,
    /// Success indicator color
    pub success_color: Color,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            title_fade_in: Duration::from_millis(200),
            title_fade_out: Duration::from_millis(300),
            border_size: 2.0,
            active_border_color: Color::TRANSPARENT,
            inactive_border_color: Color::TRANSPARENT,
            active_background_color: Color::TRANSPARENT,
            inactive_background_color: Color::TRANSPARENT,
            error_background_color: Color::TRANSPARENT,
            placeholder_color: Color::LIGHT_GRAY,
            placeholder_font: None,
            placeholder_font_scale: 0.7,
            font: FontSpec::system(17.0),
            text_color: None,
            title_font: FontSpec::system(13.0),
            title_color: Color::GRAY,
            selected_title_color: Color::BLUE,
            line_color: Color::LIGHT_GRAY,
            selected_line_color: Color::BLACK,
            line_height: 1.0,
            selected_line_height: 2.0,
            underline_style: UnderlineStyle::Thickness,
            error_color: Color::RED,
            success_color: Color::GREEN,
        }
    }
}

impl FieldConfig {
    /// Height of the title row: the title font's line height, or 15
    pub fn title_height(&self) -> f32 {
        match self.title_font.line_height {
            Some(h) if h.is_finite() && h > 0.0 => h,
            _ => DEFAULT_TITLE_HEIGHT,
        }
    }

    /// Height of the editable text row
    pub fn text_height(&self) -> f32 {
        let line = self.font.line_height.unwrap_or(self.font.size * 1.2);
        line + TEXT_HEIGHT_PADDING
    }

    pub fn placeholder_font_size(&self) -> f32 {
        match &self.placeholder_font {
            Some(font) => font.size,
            None => self.font.size * self.placeholder_font_scale,
        }
    }

    /// Load a style file, overlaying it on the defaults
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a style document, overlaying it on the defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: StyleFile = toml::from_str(content)?;
        let mut config = Self::default();
        file.apply_to(&mut config)?;
        Ok(config)
    }

    /// Serialize every knob to a style document
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&StyleFile::from_config(self))?)
    }
}

// =============================================================================
// Style file format
// =============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
struct FontFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_height: Option<f32>,
}

impl FontFile {
    fn from_spec(font: &FontSpec) -> Self {
        Self {
            family: font.family.clone(),
            size: Some(font.size),
            line_height: font.line_height,
        }
    }

    fn apply_to(self, key: &'static str, font: &mut FontSpec) -> Result<(), ConfigError> {
        if let Some(family) = self.family {
            font.family = Some(family);
        }
        if let Some(size) = self.size {
            font.size = positive(key, size)?;
        }
        if let Some(line_height) = self.line_height {
            font.line_height = Some(positive(key, line_height)?);
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
struct StyleFile {
    title_fade_in: Option<f64>,
    title_fade_out: Option<f64>,
    border_size: Option<f32>,
    active_border_color: Option<String>,
    inactive_border_color: Option<String>,
    active_background_color: Option<String>,
    inactive_background_color: Option<String>,
    error_background_color: Option<String>,
    placeholder_color: Option<String>,
    placeholder_font_scale: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
    title_color: Option<String>,
    selected_title_color: Option<String>,
    line_color: Option<String>,
    selected_line_color: Option<String>,
    line_height: Option<f32>,
    selected_line_height: Option<f32>,
    underline_style: Option<UnderlineStyle>,
    error_color: Option<String>,
    success_color: Option<String>,
    font: Option<FontFile>,
    title_font: Option<FontFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder_font: Option<FontFile>,
}

fn color(key: &'static str, literal: Option<String>, target: &mut Color) -> Result<(), ConfigError> {
    if let Some(literal) = literal {
        *target = Color::parse(&literal).map_err(|source| ConfigError::InvalidColor { key, source })?;
    }
    Ok(())
}

fn non_negative(key: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            key,
            reason: format!("expected a non-negative number, got {value}"),
        })
    }
}

fn positive(key: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            key,
            reason: format!("expected a positive number, got {value}"),
        })
    }
}

/// Seconds to a duration, rounded to the microsecond
fn seconds(key: &'static str, value: f64) -> Result<Duration, ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            key,
            reason: format!("expected a non-negative duration in seconds, got {value}"),
        });
    }
    Ok(Duration::from_micros((value * 1_000_000.0).round() as u64))
}

impl StyleFile {
    fn apply_to(self, config: &mut FieldConfig) -> Result<(), ConfigError> {
        if let Some(v) = self.title_fade_in {
            config.title_fade_in = seconds("title_fade_in", v)?;
        }
        if let Some(v) = self.title_fade_out {
            config.title_fade_out = seconds("title_fade_out", v)?;
        }
        if let Some(v) = self.border_size {
            config.border_size = non_negative("border_size", v)?;
        }
        if let Some(v) = self.placeholder_font_scale {
            config.placeholder_font_scale = positive("placeholder_font_scale", v)?;
        }
        if let Some(v) = self.line_height {
            config.line_height = non_negative("line_height", v)?;
        }
        if let Some(v) = self.selected_line_height {
            config.selected_line_height = non_negative("selected_line_height", v)?;
        }
        if let Some(style) = self.underline_style {
            config.underline_style = style;
        }

        color("active_border_color", self.active_border_color, &mut config.active_border_color)?;
        color("inactive_border_color", self.inactive_border_color, &mut config.inactive_border_color)?;
        color("active_background_color", self.active_background_color, &mut config.active_background_color)?;
        color(
            "inactive_background_color",
            self.inactive_background_color,
            &mut config.inactive_background_color,
        )?;
        color("error_background_color", self.error_background_color, &mut config.error_background_color)?;
        color("placeholder_color", self.placeholder_color, &mut config.placeholder_color)?;
        color("title_color", self.title_color, &mut config.title_color)?;
        color("selected_title_color", self.selected_title_color, &mut config.selected_title_color)?;
        color("line_color", self.line_color, &mut config.line_color)?;
        color("selected_line_color", self.selected_line_color, &mut config.selected_line_color)?;
        color("error_color", self.error_color, &mut config.error_color)?;
        color("success_color", self.success_color, &mut config.success_color)?;

        if let Some(literal) = self.text_color {
            let mut text = Color::default();
            color("text_color", Some(literal), &mut text)?;
            config.text_color = Some(text);
        }

        if let Some(font) = self.font {
            font.apply_to("font", &mut config.font)?;
        }
        if let Some(font) = self.title_font {
            font.apply_to("title_font", &mut config.title_font)?;
        }
        if let Some(font) = self.placeholder_font {
            let mut placeholder = config
                .placeholder_font
                .clone()
                .unwrap_or_else(|| FontSpec::system(config.placeholder_font_size()));
            font.apply_to("placeholder_font", &mut placeholder)?;
            config.placeholder_font = Some(placeholder);
        }
        Ok(())
    }

    fn from_config(config: &FieldConfig) -> Self {
        let hex = |c: Color| Some(c.to_hex_string());
        Self {
            title_fade_in: Some(config.title_fade_in.as_secs_f64()),
            title_fade_out: Some(config.title_fade_out.as_secs_f64()),
            border_size: Some(config.border_size),
            active_border_color: hex(config.active_border_color),
            inactive_border_color: hex(config.inactive_border_color),
            active_background_color: hex(config.active_background_color),
            inactive_background_color: hex(config.inactive_background_color),
            error_background_color: hex(config.error_background_color),
            placeholder_color: hex(config.placeholder_color),
            placeholder_font_scale: Some(config.placeholder_font_scale),
            text_color: config.text_color.map(|c| c.to_hex_string()),
            title_color: hex(config.title_color),
            selected_title_color: hex(config.selected_title_color),
            line_color: hex(config.line_color),
            selected_line_color: hex(config.selected_line_color),
            line_height: Some(config.line_height),
            selected_line_height: Some(config.selected_line_height),
            underline_style: Some(config.underline_style),
            error_color: hex(config.error_color),
            success_color: hex(config.success_color),
            font: Some(FontFile::from_spec(&config.font)),
            title_font: Some(FontFile::from_spec(&config.title_font)),
            placeholder_font: config.placeholder_font.as_ref().map(FontFile::from_spec),
        }
    }
}
