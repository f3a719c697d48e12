//! Graphic LCD drivers

pub mod logo;
pub mod st7920;

pub use logo::SPLASH;
pub use st7920::St7920;
