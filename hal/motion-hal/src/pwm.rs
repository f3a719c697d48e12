//! PWM output abstractions

/// A single PWM output channel
///
/// Duty values are in timer counts, from 0 (always low) to
/// [`max_duty`](PwmOutput::max_duty) (always high).
pub trait PwmOutput {
    /// Set the compare value
    fn set_duty(&mut self, duty: u16);

    /// Counts corresponding to 100% duty
    fn max_duty(&self) -> u16;

    /// Start driving the output
    fn enable(&mut self);

    /// Stop driving the output (pin idles low)
    fn disable(&mut self);
}
