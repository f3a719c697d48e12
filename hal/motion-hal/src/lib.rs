//! Motion Manager Hardware Abstraction Layer
//!
//! This crate defines the low-level hardware traits the display and motor
//! drivers are written against. Chip-specific crates implement them so the
//! drivers stay board-agnostic and testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  motion-core / motion-drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  motion-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ motion-hal-stm32│
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`spi::SerialTx`] - Write-only synchronous serial link
//! - [`pwm::PwmOutput`] - Single PWM channel

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use pwm::PwmOutput;
pub use spi::SerialTx;
