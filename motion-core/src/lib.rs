//! Board-agnostic core logic for the Motion Manager controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (graphic display, actuator, tick counter,
//!   periodic sources)
//! - Quadrature knob and button decoding
//! - RPM estimation and the PI speed loop
//! - Menu state machine and session state
//! - Screen composition and numeric formatting
//! - Settings types and the embedded settings parser
//! - The serialized [`MotionManager`] context tying it all together

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod input;
pub mod manager;
pub mod state;
pub mod traits;
pub mod ui;

pub use manager::MotionManager;
