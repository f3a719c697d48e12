//! Hardware driver implementations
//!
//! Concrete implementations of the motion-core traits, written against the
//! motion-hal traits so they run unchanged on the board and on the host:
//!
//! - ST7920 graphic LCD over a write-only serial link
//! - DC motor output stage (PWM plus direction line)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod motor;
