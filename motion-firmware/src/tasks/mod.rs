//! Embassy async tasks
//!
//! Source tasks only post triggers; the controller task does all the work.

pub mod buttons;
pub mod controller;
pub mod knob;
pub mod periodic;

pub use buttons::button_task;
pub use controller::controller_task;
pub use knob::knob_task;
pub use periodic::periodic_task;
