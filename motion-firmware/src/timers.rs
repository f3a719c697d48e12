//! Run gates for the periodic sources
//!
//! Each source task ticks only while its gate is open. The controller opens
//! and closes gates through [`TimerGates`]; a closed gate stops the next
//! tick, and ticks already queued are ignored by the manager.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, Ordering};

use motion_core::traits::{PeriodicTimers, TimerId};

static RUNNING: [AtomicBool; 3] = [
    AtomicBool::new(false),
    AtomicBool::new(false),
    AtomicBool::new(false),
];

static WAKE: [Signal<CriticalSectionRawMutex, ()>; 3] =
    [Signal::new(), Signal::new(), Signal::new()];

/// Check if a source's gate is open
pub fn is_running(id: TimerId) -> bool {
    RUNNING[id.index()].load(Ordering::Acquire)
}

/// Wait until a source's gate changes
pub async fn gate_changed(id: TimerId) {
    WAKE[id.index()].wait().await;
}

/// Wait until a source's gate is open
pub async fn wait_until_running(id: TimerId) {
    while !is_running(id) {
        gate_changed(id).await;
    }
}

/// Handle used by the controller to open and close the gates
pub struct TimerGates {
    _private: (),
}

impl TimerGates {
    /// Close every gate and return the handle
    pub fn new() -> Self {
        for id in TimerId::ALL {
            RUNNING[id.index()].store(false, Ordering::Release);
        }
        Self { _private: () }
    }
}

impl PeriodicTimers for TimerGates {
    fn start(&mut self, id: TimerId) {
        if !RUNNING[id.index()].swap(true, Ordering::AcqRel) {
            WAKE[id.index()].signal(());
        }
    }

    fn stop(&mut self, id: TimerId) {
        if RUNNING[id.index()].swap(false, Ordering::AcqRel) {
            WAKE[id.index()].signal(());
        }
    }

    fn is_running(&self, id: TimerId) -> bool {
        is_running(id)
    }
}
