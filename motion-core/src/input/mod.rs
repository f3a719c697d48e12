//! Knob and button decoding
//!
//! Both decoders are pure state machines fed with pin samples and
//! timestamps by the board layer.

pub mod button;
pub mod knob;

pub use button::{Button, Debouncer};
pub use knob::{PinState, QuadratureDecoder, Step};
