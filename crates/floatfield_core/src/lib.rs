//! Floatfield Core
//!
//! This crate provides the foundational primitives shared by the floatfield
//! crates:
//!
//! - **Geometry**: `Rect`, `Size` and `Point` in control-local coordinates
//! - **Colors**: RGBA colors with hex parsing for style files
//! - **Events**: The raw focus/text/blur events a host delivers to a field
//! - **State Machines**: Flat state machines for interaction states
//!
//! # Example
//!
//! ```rust
//! use floatfield_core::events::event_types;
//! use floatfield_core::fsm::StateMachine;
//!
//! const IDLE: u32 = 0;
//! const EDITING: u32 = 1;
//!
//! let mut session = StateMachine::builder(IDLE)
//!     .on(IDLE, event_types::FOCUS, EDITING)
//!     .on(EDITING, event_types::BLUR, IDLE)
//!     .build();
//!
//! session.send(event_types::FOCUS);
//! assert!(session.is_in(EDITING));
//! ```

pub mod color;
pub mod events;
pub mod fsm;
pub mod geometry;

pub use color::{Color, ColorParseError};
pub use events::{Event, EventData, EventType};
pub use fsm::{StateId, StateMachine, Transition};
pub use geometry::{Point, Rect, Size};
