//! Main controller task
//!
//! Owns the [`MotionManager`] and applies triggers one at a time, so every
//! display sequence runs to completion before the next trigger is seen.

use defmt::*;
use embassy_stm32::peripherals::{TIM1, TIM3};
use embassy_futures::select::{select, Either};
use embassy_time::{Delay, Duration, Instant, Timer};

use motion_core::state::Trigger;
use motion_core::traits::TimerId;
use motion_core::MotionManager;
use motion_drivers::display::{St7920, SPLASH};
use motion_drivers::motor::DcActuator;
use motion_hal_stm32::{PushPull, PwmChannel, QeiCounter, SpiSerialTx};

use crate::channels::TRIGGERS;
use crate::timers::TimerGates;

/// The board's concrete controller context
pub type Manager = MotionManager<
    St7920<SpiSerialTx<'static>, Delay>,
    DcActuator<PwmChannel<'static, TIM3>, PushPull<'static>>,
    QeiCounter<'static, TIM1>,
    TimerGates,
>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut manager: Manager, splash_ms: u32) {
    info!("Controller task started");

    if let Err(e) = manager.show_logo(&SPLASH) {
        warn!("Splash draw failed: {:?}", e);
    }
    // Edges queued while the logo is up go through the Logo state, which drops them
    let splash_end = Instant::now() + Duration::from_millis(u64::from(splash_ms));
    while let Either::Second(trigger) = select(Timer::at(splash_end), TRIGGERS.receive()).await {
        if let Err(e) = manager.handle(trigger) {
            warn!("Display error on {:?}: {:?}", trigger, e);
        }
    }

    if let Err(e) = manager.boot_complete() {
        warn!("Menu draw failed: {:?}", e);
    }
    info!("Boot complete");

    loop {
        let trigger = TRIGGERS.receive().await;
        let menu = manager.session().menu();

        if let Err(e) = manager.handle(trigger) {
            // The next full redraw repairs the panel
            warn!("Display error on {:?}: {:?}", trigger, e);
        }

        if manager.session().menu() != menu {
            debug!("Menu {:?} -> {:?}", menu, manager.session().menu());
        }
        if trigger == Trigger::Tick(TimerId::Refresh) {
            trace!(
                "rpm={} integral={}",
                manager.control().smoothed_rpm(),
                manager.control().integral()
            );
        }
    }
}
