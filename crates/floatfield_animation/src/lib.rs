//! Floatfield Animation System
//!
//! Timed alpha/frame transitions for the sub-layers of a control.
//!
//! # Features
//!
//! - **Easing**: CSS-style easing curves, including cubic bezier
//! - **Scheduled transitions**: `{target_alpha, target_frame, duration, on_complete}`
//!   records submitted through an injected [`AnimationPort`]
//! - **Retargeting**: a new request for a layer supersedes the in-flight one,
//!   continuing from the currently presented values
//! - **Synchronous port**: [`ImmediatePort`] applies every request at once,
//!   which keeps control logic testable without a frame clock

pub mod easing;
pub mod port;
pub mod scheduler;
pub mod transition;

pub use easing::Easing;
pub use port::{AnimationPort, ImmediatePort};
pub use scheduler::{TransitionId, TransitionScheduler};
pub use transition::{CompletionCallback, LayerState, LayerTransition};
