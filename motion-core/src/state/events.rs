//! Events that trigger state transitions

use crate::input::{Button, PinState, Step};
use crate::traits::TimerId;

/// Decoded user and lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Splash screen finished
    BootComplete,
    /// Knob click at a detent
    Step(Step),
    /// Select button accepted by the debouncer
    Select,
    /// Back button accepted by the debouncer
    Back,
}

impl From<Button> for Event {
    fn from(button: Button) -> Self {
        match button {
            Button::Select => Event::Select,
            Button::Back => Event::Back,
        }
    }
}

/// Raw trigger posted by an interrupt-driven source
///
/// Triggers carry undecoded input. The controller decodes them in order,
/// so every source is serialized through one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// A periodic source fired
    Tick(TimerId),
    /// A knob pin changed; carries the sampled level of both pins
    Knob(PinState),
    /// A button edge at a millisecond timestamp
    Button {
        button: Button,
        at_ms: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mapping() {
        assert_eq!(Event::from(Button::Select), Event::Select);
        assert_eq!(Event::from(Button::Back), Event::Back);
    }
}
