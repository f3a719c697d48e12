//! Periodic trigger sources

/// The three periodic sources driving the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerId {
    /// RPM sampling and control loop
    Sample,
    /// Numeric field refresh
    Refresh,
    /// Edit underline blink
    Blink,
}

impl TimerId {
    /// All sources, in index order
    pub const ALL: [TimerId; 3] = [TimerId::Sample, TimerId::Refresh, TimerId::Blink];

    /// Stable index for per-source tables
    pub const fn index(self) -> usize {
        match self {
            TimerId::Sample => 0,
            TimerId::Refresh => 1,
            TimerId::Blink => 2,
        }
    }
}

/// Start/stop control over the periodic sources
///
/// Starting an already running source and stopping a stopped one are no-ops.
pub trait PeriodicTimers {
    /// Enable the source
    fn start(&mut self, id: TimerId);

    /// Disable the source
    fn stop(&mut self, id: TimerId);

    /// Check if the source is enabled
    fn is_running(&self, id: TimerId) -> bool;
}
