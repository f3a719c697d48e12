//! Button edge tasks
//!
//! Buttons are active low with pull-ups. Each falling edge is timestamped
//! and forwarded; the controller applies the debounce window.

use defmt::*;
use embassy_time::Instant;
use motion_hal_stm32::EdgeInput;

use motion_core::input::Button;
use motion_core::state::Trigger;

use crate::channels::TRIGGERS;

/// Button task, one instance per button
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(mut pin: EdgeInput<'static>, button: Button) {
    info!("{:?} button task started", button);

    loop {
        pin.wait_for_falling_edge().await;

        // Millisecond clock wraps after ~49 days; the debouncer handles it
        let at_ms = Instant::now().as_millis() as u32;
        TRIGGERS.send(Trigger::Button { button, at_ms }).await;
    }
}
