//! Menu state machine and session state
//!
//! The session is the only mutable application state. It is owned by a
//! single serialized context, so no field is ever touched concurrently.

pub mod events;
pub mod machine;
pub mod session;

pub use events::{Event, Trigger};
pub use machine::{Menu, MenuItem, Transition};
pub use session::{Session, Setpoint};
