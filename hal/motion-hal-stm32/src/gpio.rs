//! GPIO adapters for STM32F3

use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Output;

/// Push-pull output implementing [`motion_hal::OutputPin`]
pub struct PushPull<'d>(Output<'d>);

impl<'d> PushPull<'d> {
    /// Wrap a configured output
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl motion_hal::OutputPin for PushPull<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Interrupt-capable input implementing [`motion_hal::InputPin`]
///
/// Edge waits park the calling task until the EXTI line fires.
pub struct EdgeInput<'d>(ExtiInput<'d>);

impl<'d> EdgeInput<'d> {
    /// Wrap a configured EXTI input
    pub fn new(pin: ExtiInput<'d>) -> Self {
        Self(pin)
    }

    /// Wait for a rising or falling edge
    pub async fn wait_for_any_edge(&mut self) {
        self.0.wait_for_any_edge().await;
    }

    /// Wait for a high-to-low transition
    pub async fn wait_for_falling_edge(&mut self) {
        self.0.wait_for_falling_edge().await;
    }
}

impl motion_hal::InputPin for EdgeInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
