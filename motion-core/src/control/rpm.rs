//! RPM estimation from a wrapping encoder counter

/// Converts per-sample encoder deltas to a smoothed RPM reading
///
/// At 100 Hz with a 100-line encoder in x4 mode one count is 15 RPM, so the
/// raw reading is coarse. The exponential moving average fills in between.
#[derive(Debug, Clone)]
pub struct RpmEstimator {
    rpm_per_tick: f32,
    alpha: f32,
    prev_ticks: i16,
    instant: f32,
    smoothed: f32,
}

impl RpmEstimator {
    /// Create an estimator
    ///
    /// - `rpm_per_tick`: RPM represented by one count per sample
    /// - `alpha`: smoothing factor, weight of the newest sample
    pub const fn new(rpm_per_tick: f32, alpha: f32) -> Self {
        Self {
            rpm_per_tick,
            alpha,
            prev_ticks: 0,
            instant: 0.0,
            smoothed: 0.0,
        }
    }

    /// Feed a raw counter value, returning the smoothed RPM
    ///
    /// The delta is taken modulo 2^16, so counter wraparound between two
    /// samples is harmless.
    pub fn update(&mut self, ticks: i16) -> f32 {
        let delta = ticks.wrapping_sub(self.prev_ticks);
        self.prev_ticks = ticks;

        self.instant = self.rpm_per_tick * f32::from(delta);
        self.smoothed = self.alpha * self.instant + (1.0 - self.alpha) * self.smoothed;
        self.smoothed
    }

    /// Smoothed RPM
    pub fn smoothed(&self) -> f32 {
        self.smoothed
    }

    /// Forget all history; the next sample is measured against count 0
    pub fn reset(&mut self) {
        self.prev_ticks = 0;
        self.instant = 0.0;
        self.smoothed = 0.0;
    }
}
