//! PI controller with clamped integral

/// PI gains and integral bounds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PiGains {
    /// Proportional gain
    pub kp: f32,
    /// Integral gain, applied once per step
    pub ki: f32,
    /// Integral lower bound
    pub integral_min: f32,
    /// Integral upper bound
    pub integral_max: f32,
}

/// Proportional-integral controller
///
/// Anti-windup is a hard clamp on the accumulator after every step.
#[derive(Debug, Clone)]
pub struct PiController {
    gains: PiGains,
    integral: f32,
}

impl PiController {
    /// Create a controller with an empty integral
    pub const fn new(gains: PiGains) -> Self {
        Self {
            gains,
            integral: 0.0,
        }
    }

    /// Run one step on `error` and return the raw output
    pub fn step(&mut self, error: f32) -> f32 {
        let g = &self.gains;
        self.integral = (self.integral + g.ki * error).clamp(g.integral_min, g.integral_max);
        g.kp * error + self.integral
    }

    /// Accumulated integral term
    pub fn integral(&self) -> f32 {
        self.integral
    }

    /// Clear the integral
    pub fn reset(&mut self) {
        self.integral = 0.0;
    }
}
