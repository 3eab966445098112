//! Scheduled transition records

use std::fmt;
use std::time::Duration;

use floatfield_core::Rect;

use crate::easing::Easing;

/// Invoked exactly once per transition request.
///
/// The flag is `true` when the transition reached its target and `false`
/// when a newer request for the same layer superseded it.
pub type CompletionCallback = Box<dyn FnOnce(bool) + Send>;

/// Presented alpha and frame of a layer
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerState {
    pub alpha: f32,
    pub frame: Rect,
}

impl LayerState {
    pub const fn new(frame: Rect, alpha: f32) -> Self {
        Self { alpha, frame }
    }

    /// Interpolate towards `to`; `t` is already eased
    pub fn lerp(&self, to: &LayerState, t: f32) -> LayerState {
        LayerState {
            alpha: self.alpha + (to.alpha - self.alpha) * t,
            frame: self.frame.lerp(&to.frame, t),
        }
    }
}

/// A request to move a layer to a new alpha and frame over time
pub struct LayerTransition {
    pub target_alpha: f32,
    pub target_frame: Rect,
    pub duration: Duration,
    pub easing: Easing,
    pub on_complete: Option<CompletionCallback>,
}

impl LayerTransition {
    pub fn new(target_frame: Rect, target_alpha: f32, duration: Duration) -> Self {
        Self {
            target_alpha,
            target_frame,
            duration,
            easing: Easing::EaseOut,
            on_complete: None,
        }
    }

    /// Set the easing curve
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Attach a completion callback
    pub fn on_complete<F: FnOnce(bool) + Send + 'static>(mut self, callback: F) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn target(&self) -> LayerState {
        LayerState::new(self.target_frame, self.target_alpha)
    }

    /// Fire the completion callback, if any
    pub fn complete(self, finished: bool) {
        if let Some(callback) = self.on_complete {
            callback(finished);
        }
    }
}

impl fmt::Debug for LayerTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerTransition")
            .field("target_alpha", &self.target_alpha)
            .field("target_frame", &self.target_frame)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("has_on_complete", &self.on_complete.is_some())
            .finish()
    }
}
