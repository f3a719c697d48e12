//! Inter-task communication channels
//!
//! Every trigger source posts into one queue; the controller task is its
//! only consumer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use motion_core::state::Trigger;

/// Channel capacity for triggers
///
/// Sized for a full-screen redraw (about 100 ms of serial traffic) during
/// which the sample source keeps firing.
const TRIGGER_CHANNEL_SIZE: usize = 16;

/// Raw triggers from timers, knob and buttons
pub static TRIGGERS: Channel<CriticalSectionRawMutex, Trigger, TRIGGER_CHANNEL_SIZE> =
    Channel::new();
