//! STM32F3-specific HAL for the Motion Manager firmware
//!
//! Adapters that implement `motion-hal` and `motion-core` traits on top of
//! embassy-stm32 peripherals:
//!
//! - STM32F303K8 (Nucleo-32 form factor controller board)
//!
//! # Features
//!
//! - `stm32f303k8` - Enable support for STM32F303K8T6
//! - `defmt` - Enable debug formatting support

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;
pub mod qei;
pub mod spi;

pub use gpio::{EdgeInput, PushPull};
pub use pwm::PwmChannel;
pub use qei::QeiCounter;
pub use spi::SpiSerialTx;
