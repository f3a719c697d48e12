//! Configuration type definitions
//!
//! All values are plain scalars. Missing or rejected settings fall back to
//! [`Settings::default`], so the controller always has something to run with.

/// PI speed loop tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlSettings {
    /// Proportional gain
    pub kp: f32,
    /// Integral gain (applied per sample)
    pub ki: f32,
    /// Lower clamp of the integral accumulator
    pub integral_min: f32,
    /// Upper clamp of the integral accumulator
    pub integral_max: f32,
    /// RPM smoothing factor, 0 < alpha <= 1
    pub alpha: f32,
    /// Full-scale actuator magnitude (PWM resolution)
    pub pwm_resolution: u16,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            kp: 0.02,
            ki: 0.01,
            integral_min: -2048.0,
            integral_max: 2048.0,
            alpha: 0.128,
            pwm_resolution: 2048,
        }
    }
}

/// Adjustable setpoint range
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeSettings {
    /// Lowest value the knob can reach
    pub lower: f32,
    /// Highest value the knob can reach
    pub upper: f32,
    /// Change per knob click
    pub resolution: f32,
}

impl RangeSettings {
    /// Default voltage range (0-24 V in 0.1 V steps)
    pub const VOLTAGE: Self = Self {
        lower: 0.0,
        upper: 24.0,
        resolution: 0.1,
    };

    /// Default RPM range (0-10000 RPM in 100 RPM steps)
    pub const RPM: Self = Self {
        lower: 0.0,
        upper: 10_000.0,
        resolution: 100.0,
    };

    /// Apply one knob click to `value`, keeping the result within range
    pub fn step(&self, value: f32, up: bool) -> f32 {
        let next = if up {
            value + self.resolution
        } else {
            value - self.resolution
        };
        next.clamp(self.lower, self.upper)
    }
}

/// Motor encoder geometry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderSettings {
    /// Encoder lines per motor revolution
    pub pulses_per_rev: f32,
    /// Counts per line (4 for x4 quadrature capture)
    pub quadrature_multiplier: u8,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            pulses_per_rev: 100.0,
            quadrature_multiplier: 4,
        }
    }
}

/// Flow rate as a quadratic of motor voltage: `a·V² + b·V + c`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlowRateSettings {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

/// Periodic source rates and UI timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingSettings {
    /// Control loop sample rate in Hz
    pub sample_hz: u32,
    /// Numeric field refresh period
    pub refresh_ms: u32,
    /// Underline blink half-period
    pub blink_ms: u32,
    /// Button debounce window
    pub debounce_ms: u32,
    /// How long the splash bitmap stays up
    pub splash_ms: u32,
}

impl TimingSettings {
    /// Sample period in microseconds
    pub fn sample_period_us(&self) -> u64 {
        1_000_000 / u64::from(self.sample_hz.max(1))
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            sample_hz: 100,
            refresh_ms: 200,
            blink_ms: 800,
            debounce_ms: 400,
            splash_ms: 2000,
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub control: ControlSettings,
    pub voltage: RangeSettings,
    pub rpm: RangeSettings,
    pub encoder: EncoderSettings,
    pub flow_rate: FlowRateSettings,
    pub timing: TimingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control: ControlSettings::default(),
            voltage: RangeSettings::VOLTAGE,
            rpm: RangeSettings::RPM,
            encoder: EncoderSettings::default(),
            flow_rate: FlowRateSettings::default(),
            timing: TimingSettings::default(),
        }
    }
}

/// Reasons a settings set is unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Pulses per revolution or quadrature multiplier is not positive
    InvalidEncoder,
    /// Smoothing factor outside (0, 1]
    InvalidAlpha,
    /// Integral bounds inverted
    InvertedIntegralBounds,
    /// PWM resolution is zero
    InvalidPwmResolution,
    /// Voltage range inverted or step not positive
    InvalidVoltageRange,
    /// RPM range inverted or step not positive
    InvalidRpmRange,
    /// A rate or period is zero
    InvalidTiming,
}

impl Settings {
    /// RPM represented by one encoder count at the configured sample rate
    pub fn rpm_per_tick(&self) -> f32 {
        (60.0 * self.timing.sample_hz as f32)
            / (self.encoder.pulses_per_rev * f32::from(self.encoder.quadrature_multiplier))
    }

    /// Check that every value is usable
    ///
    /// Comparisons are written so that NaN fails them.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let c = &self.control;
        if !(self.encoder.pulses_per_rev > 0.0) || self.encoder.quadrature_multiplier == 0 {
            return Err(SettingsError::InvalidEncoder);
        }
        if !(c.alpha > 0.0 && c.alpha <= 1.0) {
            return Err(SettingsError::InvalidAlpha);
        }
        if !(c.integral_min <= c.integral_max) {
            return Err(SettingsError::InvertedIntegralBounds);
        }
        if c.pwm_resolution == 0 {
            return Err(SettingsError::InvalidPwmResolution);
        }
        if !range_ok(&self.voltage) || !(self.voltage.upper > 0.0) {
            return Err(SettingsError::InvalidVoltageRange);
        }
        if !range_ok(&self.rpm) {
            return Err(SettingsError::InvalidRpmRange);
        }
        let t = &self.timing;
        if t.sample_hz == 0 || t.refresh_ms == 0 || t.blink_ms == 0 {
            return Err(SettingsError::InvalidTiming);
        }
        Ok(())
    }
}

fn range_ok(range: &RangeSettings) -> bool {
    range.lower <= range.upper && range.resolution > 0.0
}
