//! PWM output adapter for STM32F3 timers

use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_stm32::timer::{Channel, GeneralInstance4Channel};

/// One channel of a [`SimplePwm`] timer implementing
/// [`motion_hal::PwmOutput`]
pub struct PwmChannel<'d, T: GeneralInstance4Channel> {
    pwm: SimplePwm<'d, T>,
    channel: Channel,
}

impl<'d, T: GeneralInstance4Channel> PwmChannel<'d, T> {
    /// Take over a timer, driving only `channel`
    ///
    /// The channel starts disabled with zero duty.
    pub fn new(mut pwm: SimplePwm<'d, T>, channel: Channel) -> Self {
        pwm.channel(channel).set_duty_cycle(0);
        pwm.channel(channel).disable();
        Self { pwm, channel }
    }
}

impl<T: GeneralInstance4Channel> motion_hal::PwmOutput for PwmChannel<'_, T> {
    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(self.pwm.max_duty_cycle());
        self.pwm.channel(self.channel).set_duty_cycle(duty);
    }

    fn max_duty(&self) -> u16 {
        self.pwm.max_duty_cycle()
    }

    fn enable(&mut self) {
        self.pwm.channel(self.channel).enable();
    }

    fn disable(&mut self) {
        self.pwm.channel(self.channel).disable();
    }
}
