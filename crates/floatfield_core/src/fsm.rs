//! State Machine
//!
//! A flat, table-driven state machine for control interaction states, such
//! as the idle/editing session of a text field. Events with no matching row
//! for the current state are ignored.

use smallvec::SmallVec;

use crate::events::EventType;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// One row of the transition table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventType,
    pub to_state: StateId,
}

impl Transition {
    pub const fn new(from: StateId, event: EventType, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }

    fn accepts(&self, state: StateId, event: EventType) -> bool {
        self.from_state == state && self.event == event
    }
}

/// Builder for creating state machines
#[derive(Debug)]
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: SmallVec<[Transition; 4]>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
        }
    }

    /// Add a transition (from, event, to)
    pub fn on(mut self, from: StateId, event: EventType, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            last_transition: None,
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    current_state: StateId,
    transitions: SmallVec<[Transition; 4]>,
    last_transition: Option<Transition>,
}

impl StateMachine {
    /// Create a state machine from a complete transition table
    pub fn new(initial_state: StateId, transitions: impl IntoIterator<Item = Transition>) -> Self {
        Self {
            current_state: initial_state,
            transitions: transitions.into_iter().collect(),
            last_transition: None,
        }
    }

    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// The most recent transition taken, if any
    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }

    /// Whether `event` would move the machine out of its current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.find(event).is_some()
    }

    /// Send an event; returns the state after handling it
    pub fn send(&mut self, event: EventType) -> StateId {
        if let Some(transition) = self.find(event) {
            tracing::trace!(
                from = transition.from_state,
                event,
                to = transition.to_state,
                "fsm transition"
            );
            self.current_state = transition.to_state;
            self.last_transition = Some(transition);
        }
        self.current_state
    }

    fn find(&self, event: EventType) -> Option<Transition> {
        self.transitions
            .iter()
            .find(|t| t.accepts(self.current_state, event))
            .copied()
    }
}
