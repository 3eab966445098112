//! Animation ports
//!
//! A control never drives a clock itself. It submits transitions to an
//! [`AnimationPort`] owned by the host, which is free to run them on its own
//! animation scheduler.

use std::hash::Hash;

use floatfield_core::Rect;
use rustc_hash::FxHashMap;

use crate::transition::{LayerState, LayerTransition};

/// Sink for layer transitions, keyed by a layer identifier
pub trait AnimationPort<K> {
    /// Set frame and alpha synchronously, superseding any in-flight transition
    fn apply(&mut self, layer: K, frame: Rect, alpha: f32);

    /// Start a timed transition, retargeting any in-flight one for the same layer
    fn animate(&mut self, layer: K, transition: LayerTransition);

    /// Currently presented state of a layer, if it was ever set
    fn presentation(&self, layer: K) -> Option<LayerState>;
}

/// Port that completes every transition on submission
#[derive(Debug)]
pub struct ImmediatePort<K> {
    layers: FxHashMap<K, LayerState>,
}

impl<K: Copy + Eq + Hash> ImmediatePort<K> {
    pub fn new() -> Self {
        Self {
            layers: FxHashMap::default(),
        }
    }
}

impl<K: Copy + Eq + Hash> Default for ImmediatePort<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> AnimationPort<K> for ImmediatePort<K> {
    fn apply(&mut self, layer: K, frame: Rect, alpha: f32) {
        self.layers.insert(layer, LayerState::new(frame, alpha));
    }

    fn animate(&mut self, layer: K, transition: LayerTransition) {
        self.layers.insert(layer, transition.target());
        transition.complete(true);
    }

    fn presentation(&self, layer: K) -> Option<LayerState> {
        self.layers.get(&layer).copied()
    }
}
