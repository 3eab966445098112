//! Field events
//!
//! The raw events a host's text-input source delivers to a field.

/// Event type identifier
pub type EventType = u32;

/// Event types understood by text fields
pub mod event_types {
    use super::EventType;

    /// The field gained input focus (edit session begins)
    pub const FOCUS: EventType = 10;
    /// The field lost input focus (edit session ends)
    pub const BLUR: EventType = 11;
    /// The text content changed during an edit session
    pub const TEXT_INPUT: EventType = 22;
    /// Layout bounds changed
    pub const RESIZE: EventType = 40;
}

/// A field event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, Default)]
pub enum EventData {
    /// Full text content after an edit
    TextInput { text: String },
    Resize { width: f32, height: f32 },
    #[default]
    None,
}

impl Event {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            data: EventData::None,
            timestamp: 0,
        }
    }

    pub fn focus() -> Self {
        Self::new(event_types::FOCUS)
    }

    pub fn blur() -> Self {
        Self::new(event_types::BLUR)
    }

    pub fn text_input(text: impl Into<String>) -> Self {
        Self {
            event_type: event_types::TEXT_INPUT,
            data: EventData::TextInput { text: text.into() },
            timestamp: 0,
        }
    }

    pub fn resize(width: f32, height: f32) -> Self {
        Self {
            event_type: event_types::RESIZE,
            data: EventData::Resize { width, height },
            timestamp: 0,
        }
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }
}
