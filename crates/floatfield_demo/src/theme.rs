//! Sample theme for the demo screen

use floatfield_core::Color;
use floatfield_widgets::{FieldConfig, FontSpec};

pub const DARK_GREY: u32 = 0x342A3D;
pub const PURPLE: u32 = 0x800080;

/// Email rule used by the demo screen
pub const EMAIL_PATTERN: &str = r"[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}";

/// Dark text on a purple field with a red underline
pub fn travel_theme() -> FieldConfig {
    FieldConfig {
        text_color: Some(Color::from_hex(DARK_GREY)),
        line_color: Color::RED,
        selected_line_color: Color::RED,
        active_border_color: Color::WHITE,
        active_background_color: Color::from_hex(PURPLE),
        placeholder_color: Color::WHITE,
        selected_title_color: Color::from_hex(DARK_GREY),
        title_font: FontSpec::system(12.0).with_line_height(14.5),
        placeholder_font: Some(FontSpec::system(18.0)),
        font: FontSpec::system(18.0).with_line_height(21.5),
        ..FieldConfig::default()
    }
}
