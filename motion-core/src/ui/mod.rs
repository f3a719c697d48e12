//! Screen composition and numeric formatting

pub mod format;
pub mod screens;

pub use format::Decimal;
