//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod display;
pub mod encoder;
pub mod motor;
pub mod timer;

pub use display::{Bitmap, DisplayError, DisplayMode, GraphicDisplay, ShapeExt, BITMAP_LEN};
pub use encoder::TickCounter;
pub use motor::{Actuator, ActuatorCommand, Direction};
pub use timer::{PeriodicTimers, TimerId};
