//! Motor output stages

pub mod dc;

pub use dc::DcActuator;
