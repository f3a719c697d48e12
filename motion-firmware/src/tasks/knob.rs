//! Knob edge task
//!
//! Samples both quadrature pins on every edge of either one. Decoding
//! happens in the controller so that no edge is processed out of order.

use defmt::*;
use embassy_futures::select::select;
use motion_hal::InputPin;
use motion_hal_stm32::EdgeInput;

use motion_core::input::PinState;
use motion_core::state::Trigger;

use crate::channels::TRIGGERS;

/// Knob task
#[embassy_executor::task]
pub async fn knob_task(mut a: EdgeInput<'static>, mut b: EdgeInput<'static>) {
    info!("Knob task started");

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        let state = PinState::from_pins(a.is_high(), b.is_high());
        TRIGGERS.send(Trigger::Knob(state)).await;
    }
}
