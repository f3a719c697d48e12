//! Settings loading
//!
//! The settings file is compiled into the image. A file that fails to parse
//! or validate is reported and replaced by the built-in defaults.

use defmt::*;

use motion_core::config::{parse_settings, Settings};

/// Embedded settings (edit motion.toml and rebuild to customize)
const EMBEDDED_SETTINGS: &str = include_str!("../motion.toml");

/// Parse and validate the embedded settings, falling back to defaults
pub fn load_settings() -> Settings {
    let settings = match parse_settings(EMBEDDED_SETTINGS) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("motion.toml parse error: {:?}, using defaults", e);
            return Settings::default();
        }
    };

    if let Err(e) = settings.validate() {
        warn!("motion.toml rejected: {:?}, using defaults", e);
        return Settings::default();
    }

    info!(
        "Settings: kp={} ki={} alpha={} ppr={}",
        settings.control.kp,
        settings.control.ki,
        settings.control.alpha,
        settings.encoder.pulses_per_rev
    );
    settings
}
