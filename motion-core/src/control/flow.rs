//! Flow rate estimate from motor voltage

use crate::config::FlowRateSettings;

/// Quadratic flow model, `a·V² + b·V + c` in ml/min
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlowModel {
    a: f32,
    b: f32,
    c: f32,
}

impl FlowModel {
    pub const fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    /// Flow at the given motor voltage
    pub fn rate(&self, volts: f32) -> f32 {
        self.a * volts * volts + self.b * volts + self.c
    }
}

impl From<FlowRateSettings> for FlowModel {
    fn from(s: FlowRateSettings) -> Self {
        Self::new(s.a, s.b, s.c)
    }
}
