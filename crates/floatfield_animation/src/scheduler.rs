//! Transition scheduler
//!
//! Manages all in-flight layer transitions and advances them each frame.
//! At most one transition runs per layer; submitting a new one retargets
//! the layer from wherever it currently is.

use std::hash::Hash;

use floatfield_core::Rect;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::easing::Easing;
use crate::port::AnimationPort;
use crate::transition::{LayerState, LayerTransition};

new_key_type! {
    pub struct TransitionId;
}

struct ActiveTransition<K> {
    layer: K,
    from: LayerState,
    to: LayerState,
    /// Seconds since the transition started
    elapsed: f32,
    /// Total duration in seconds
    duration: f32,
    easing: Easing,
    request: LayerTransition,
}

impl<K> ActiveTransition<K> {
    fn sample(&self) -> LayerState {
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        };
        self.from.lerp(&self.to, self.easing.apply(t))
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Frame-ticked scheduler for layer transitions
pub struct TransitionScheduler<K> {
    transitions: SlotMap<TransitionId, ActiveTransition<K>>,
    by_layer: FxHashMap<K, TransitionId>,
    presented: FxHashMap<K, LayerState>,
}

impl<K: Copy + Eq + Hash> TransitionScheduler<K> {
    pub fn new() -> Self {
        Self {
            transitions: SlotMap::with_key(),
            by_layer: FxHashMap::default(),
            presented: FxHashMap::default(),
        }
    }

    /// Drop the in-flight transition of a layer and report it as superseded
    fn supersede(&mut self, layer: K) {
        if let Some(id) = self.by_layer.remove(&layer) {
            if let Some(active) = self.transitions.remove(id) {
                tracing::trace!("superseding in-flight transition");
                active.request.complete(false);
            }
        }
    }

    /// Tick all transitions by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let mut finished = Vec::new();

        for (id, active) in self.transitions.iter_mut() {
            active.elapsed += dt;
            self.presented.insert(active.layer, active.sample());
            if active.is_finished() {
                finished.push(id);
            }
        }

        for id in finished {
            if let Some(active) = self.transitions.remove(id) {
                self.by_layer.remove(&active.layer);
                self.presented.insert(active.layer, active.to);
                active.request.complete(true);
            }
        }
    }

    /// Check if any transitions are still running
    pub fn has_active_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Check if a specific layer is mid-transition
    pub fn is_animating(&self, layer: K) -> bool {
        self.by_layer.contains_key(&layer)
    }

    /// Get the number of running transitions
    pub fn active_count(&self) -> usize {
        self.transitions.len()
    }

    /// Target of the in-flight transition for a layer
    pub fn target(&self, layer: K) -> Option<LayerState> {
        let id = self.by_layer.get(&layer)?;
        self.transitions.get(*id).map(|active| active.to)
    }
}

impl<K: Copy + Eq + Hash> Default for TransitionScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> AnimationPort<K> for TransitionScheduler<K> {
    fn apply(&mut self, layer: K, frame: Rect, alpha: f32) {
        self.supersede(layer);
        self.presented.insert(layer, LayerState::new(frame, alpha));
    }

    fn animate(&mut self, layer: K, transition: LayerTransition) {
        self.supersede(layer);

        let to = transition.target();
        let duration = transition.duration.as_secs_f32();
        if duration <= 0.0 {
            self.presented.insert(layer, to);
            transition.complete(true);
            return;
        }

        let from = self.presented.get(&layer).copied().unwrap_or(to);
        let id = self.transitions.insert(ActiveTransition {
            layer,
            from,
            to,
            elapsed: 0.0,
            duration,
            easing: transition.easing,
            request: transition,
        });
        self.by_layer.insert(layer, id);
    }

    fn presentation(&self, layer: K) -> Option<LayerState> {
        self.presented.get(&layer).copied()
    }
}
