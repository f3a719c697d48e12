//! Periodic trigger sources
//!
//! One task per [`TimerId`], each gated by the controller through
//! [`crate::timers::TimerGates`].

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use motion_core::state::Trigger;
use motion_core::traits::TimerId;

use crate::channels::TRIGGERS;
use crate::timers;

/// Periodic source task
///
/// Ticks are posted without waiting: if the controller is behind, a tick
/// is dropped rather than delivered late.
#[embassy_executor::task(pool_size = 3)]
pub async fn periodic_task(id: TimerId, period: Duration) {
    info!("{:?} source started, period {} us", id, period.as_micros());

    loop {
        timers::wait_until_running(id).await;

        // Restarting re-phases the ticker
        let mut ticker = Ticker::every(period);
        while timers::is_running(id) {
            match select(ticker.next(), timers::gate_changed(id)).await {
                Either::First(()) => {
                    if timers::is_running(id) && TRIGGERS.try_send(Trigger::Tick(id)).is_err() {
                        trace!("{:?} tick dropped", id);
                    }
                }
                Either::Second(()) => {}
            }
        }
    }
}
