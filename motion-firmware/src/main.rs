//! Motion Manager - Pump Controller Firmware
//!
//! Main firmware binary for STM32F303K8 boards driving a DC pump motor
//! with encoder feedback, an ST7920 128x64 LCD, a rotary knob and two
//! buttons.
//!
//! Pin map:
//!
//! | Function            | Pin        | Peripheral      |
//! |---------------------|------------|-----------------|
//! | LCD SCLK / SID      | PA5 / PA7  | SPI1 (tx only)  |
//! | LCD CS (active high)| PA4        | GPIO            |
//! | Motor PWM           | PA6        | TIM3 CH1        |
//! | Motor direction     | PA10       | GPIO, low = fwd |
//! | Encoder A / B       | PA8 / PA9  | TIM1 QEI        |
//! | Knob A / B          | PB4 / PB5  | EXTI4 / EXTI5   |
//! | Select button       | PA11       | EXTI11          |
//! | Back button         | PF1        | EXTI1           |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::{Level, Output, OutputType, Pull, Speed};
use embassy_stm32::spi::Spi;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::qei::{Qei, QeiPin};
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::Channel;
use embassy_time::{Delay, Duration};
use {defmt_rtt as _, panic_probe as _};

use motion_core::input::Button;
use motion_core::traits::TimerId;
use motion_core::MotionManager;
use motion_drivers::display::St7920;
use motion_drivers::motor::DcActuator;
use motion_hal::spi::SpiConfig;
use motion_hal_stm32::spi::to_embassy_config;
use motion_hal_stm32::{EdgeInput, PushPull, PwmChannel, QeiCounter, SpiSerialTx};

use crate::timers::TimerGates;

mod channels;
mod config;
mod tasks;
mod timers;

bind_interrupts!(struct Irqs {
    EXTI1 => exti::InterruptHandler<embassy_stm32::interrupt::typelevel::EXTI1>;
    EXTI4 => exti::InterruptHandler<embassy_stm32::interrupt::typelevel::EXTI4>;
    EXTI9_5 => exti::InterruptHandler<embassy_stm32::interrupt::typelevel::EXTI9_5>;
    EXTI15_10 => exti::InterruptHandler<embassy_stm32::interrupt::typelevel::EXTI15_10>;
});

/// Motor PWM carrier frequency
const PWM_FREQUENCY_HZ: u32 = 20_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Motion Manager {} starting...", motion_core::manager::VERSION);

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let settings = config::load_settings();

    // LCD: write-only SPI, chip select held high
    let spi = Spi::new_blocking_txonly(
        p.SPI1,
        p.PA5,
        p.PA7,
        to_embassy_config(&SpiConfig::ST7920),
    );
    let cs = Output::new(p.PA4, Level::High, Speed::Low);
    let mut lcd = St7920::new(SpiSerialTx::new(spi, cs), Delay);
    lcd.init();
    info!("LCD initialized");

    // Motor output stage
    let pwm = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new(p.PA6, OutputType::PushPull)),
        None,
        None,
        None,
        Hertz(PWM_FREQUENCY_HZ),
        CountingMode::EdgeAlignedUp,
    );
    let direction = PushPull::new(Output::new(p.PA10, Level::Low, Speed::Low));
    let motor = DcActuator::new(
        PwmChannel::new(pwm, Channel::Ch1),
        direction,
        settings.control.pwm_resolution,
    );

    // Motor encoder
    let qei = Qei::new(p.TIM1, QeiPin::new_ch1(p.PA8), QeiPin::new_ch2(p.PA9));
    let encoder = QeiCounter::new(qei);

    let manager = MotionManager::new(lcd, motor, encoder, TimerGates::new(), &settings);

    // Knob and buttons
    let knob_a = EdgeInput::new(ExtiInput::new(p.PB4, p.EXTI4, Pull::Up, Irqs));
    let knob_b = EdgeInput::new(ExtiInput::new(p.PB5, p.EXTI5, Pull::Up, Irqs));
    let select = EdgeInput::new(ExtiInput::new(p.PA11, p.EXTI11, Pull::Up, Irqs));
    let back = EdgeInput::new(ExtiInput::new(p.PF1, p.EXTI1, Pull::Up, Irqs));

    let timing = settings.timing;
    let periods = [
        (TimerId::Sample, Duration::from_micros(timing.sample_period_us())),
        (TimerId::Refresh, Duration::from_millis(u64::from(timing.refresh_ms))),
        (TimerId::Blink, Duration::from_millis(u64::from(timing.blink_ms))),
    ];

    // Spawn tasks
    spawner
        .spawn(tasks::controller_task(manager, timing.splash_ms))
        .unwrap();
    for (id, period) in periods {
        spawner.spawn(tasks::periodic_task(id, period)).unwrap();
    }
    spawner.spawn(tasks::knob_task(knob_a, knob_b)).unwrap();
    spawner
        .spawn(tasks::button_task(select, Button::Select))
        .unwrap();
    spawner.spawn(tasks::button_task(back, Button::Back)).unwrap();

    info!("All tasks spawned");
}
