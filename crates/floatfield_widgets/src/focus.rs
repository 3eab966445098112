//! Host focus system port

/// Input focus owned by the host's platform layer
pub trait FocusHost {
    /// Ask for input focus; returns whether it was granted
    fn become_first_responder(&mut self) -> bool;

    /// Give input focus up; returns whether it was released
    fn resign_first_responder(&mut self) -> bool;
}

/// Focus host that grants every request
#[derive(Clone, Copy, Debug, Default)]
pub struct GrantingFocus;

impl FocusHost for GrantingFocus {
    fn become_first_responder(&mut self) -> bool {
        true
    }

    fn resign_first_responder(&mut self) -> bool {
        true
    }
}
