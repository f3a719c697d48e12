//! Quadrature encoder counter trait

/// Free-running 16-bit tick counter fed by quadrature capture hardware
///
/// The count wraps at 16 bits; consumers take wrapping differences.
pub trait TickCounter {
    /// Current count
    fn count(&mut self) -> i16;

    /// Zero the count
    fn reset(&mut self);

    /// Start or stop counting
    fn set_enabled(&mut self, enabled: bool);
}
