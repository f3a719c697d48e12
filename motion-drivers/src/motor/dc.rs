//! DC motor output stage: one PWM channel plus a direction line
//!
//! Duty is expressed in actuator units (the PWM resolution from settings)
//! and rescaled to the timer's own counts, so the control loop never needs
//! to know the timer configuration.
//!
//! ```ignore
//! let mut motor = DcActuator::new(pwm, dir_pin, 2048);
//! motor.enable(true);
//! motor.apply(ActuatorCommand { magnitude: 1024, direction: Direction::Forward });
//! ```

use motion_core::traits::{Actuator, ActuatorCommand, Direction};
use motion_hal::{OutputPin, PwmOutput};

/// PWM + direction motor driver
pub struct DcActuator<P, O> {
    pwm: P,
    direction_pin: O,
    /// Actuator units corresponding to 100% duty
    resolution: u16,
    command: ActuatorCommand,
    enabled: bool,
}

impl<P, O> DcActuator<P, O>
where
    P: PwmOutput,
    O: OutputPin,
{
    /// Create a stopped, disabled driver
    pub fn new(mut pwm: P, mut direction_pin: O, resolution: u16) -> Self {
        pwm.set_duty(0);
        pwm.disable();
        direction_pin.set_low();
        Self {
            pwm,
            direction_pin,
            resolution: resolution.max(1),
            command: ActuatorCommand::STOP,
            enabled: false,
        }
    }

    /// Convert actuator units to timer counts
    fn scale_duty(&self, magnitude: u16) -> u16 {
        let magnitude = u32::from(magnitude.min(self.resolution));
        let duty = magnitude * u32::from(self.pwm.max_duty()) / u32::from(self.resolution);
        duty as u16
    }
}

impl<P, O> Actuator for DcActuator<P, O>
where
    P: PwmOutput,
    O: OutputPin,
{
    fn apply(&mut self, command: ActuatorCommand) {
        let command = ActuatorCommand {
            magnitude: command.magnitude.min(self.resolution),
            direction: command.direction,
        };
        // Low drives the pump forward
        self.direction_pin
            .set_state(command.direction == Direction::Reverse);
        self.command = command;
        let duty = self.scale_duty(command.magnitude);
        self.pwm.set_duty(duty);
    }

    fn enable(&mut self, enabled: bool) {
        if enabled {
            self.pwm.enable();
        } else {
            self.pwm.disable();
        }
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn max_magnitude(&self) -> u16 {
        self.resolution
    }

    fn command(&self) -> ActuatorCommand {
        self.command
    }
}
