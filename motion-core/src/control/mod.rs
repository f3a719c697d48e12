//! Motor speed measurement and control
//!
//! Runs once per sample tick: encoder delta to RPM, exponential smoothing,
//! then either the PI loop (RPM control) or nothing (voltage control, where
//! the output is set once on commit).

pub mod flow;
pub mod pi;
pub mod rpm;
pub mod speed;

pub use flow::FlowModel;
pub use pi::{PiController, PiGains};
pub use rpm::RpmEstimator;
pub use speed::{ControlLoop, ControlMode};
