//! Configuration types
//!
//! Every tunable the controller consumes, with the defaults the released
//! firmware shipped with, plus a parser for the embedded settings file.

pub mod parse;
pub mod types;

pub use parse::{parse_settings, ParseError};
pub use types::*;
