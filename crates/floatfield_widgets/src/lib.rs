//! Floatfield Widget Library
//!
//! A floating-label text field: the title floats above the input while the
//! field is focused or holds text, an error label appears below the underline,
//! and a success indicator marks text that passed its validation rules.
//!
//! The control is framework-agnostic. A host adapter forwards focus and text
//! events, reads the [`RenderPlan`](planner::RenderPlan) and owns the drawable
//! layers, which it moves through an injected
//! [`AnimationPort`](floatfield_animation::AnimationPort).
//!
//! # Example
//!
//! ```rust
//! use floatfield_core::Rect;
//! use floatfield_widgets::prelude::*;
//!
//! let mut field = floating_text_field()
//!     .bounds(Rect::new(0.0, 0.0, 200.0, 60.0))
//!     .title("Email")
//!     .rules(RuleSet::new([ValidationRule::new(r"[^@]+@[^@]+", "Email not valid")]))
//!     .build();
//!
//! field.become_first_responder();
//! field.on_text_input("not-an-email");
//! field.resign_first_responder();
//!
//! assert!(!field.validate());
//! assert_eq!(field.error_message(), Some("Email not valid"));
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod focus;
pub mod planner;
pub mod state;
pub mod validation;

pub use config::{FieldConfig, FontSpec, UnderlineStyle};
pub use error::{ConfigError, FieldError};
pub use field::{floating_text_field, FieldLayer, FloatingTextField, FloatingTextFieldBuilder};
pub use focus::{FocusHost, GrantingFocus};
pub use planner::RenderPlan;
pub use state::{DerivedState, FieldContent, InteractionFlags, ValidationState};
pub use validation::{RuleSet, ValidationOutcome, ValidationRule};

/// Commonly used types
pub mod prelude {
    pub use crate::config::{FieldConfig, FontSpec, UnderlineStyle};
    pub use crate::field::{floating_text_field, FieldLayer, FloatingTextField};
    pub use crate::focus::FocusHost;
    pub use crate::validation::{RuleSet, ValidationRule};
}
