//! Per-sample control loop

use super::{FlowModel, PiController, PiGains, RpmEstimator};
use crate::config::Settings;
use crate::traits::{ActuatorCommand, Direction};

/// What the sample tick should do with the measured speed
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlMode {
    /// Close the loop on an RPM setpoint
    ClosedLoop {
        /// Committed setpoint
        setpoint_rpm: f32,
    },
    /// Measure only; the output is held at the committed voltage
    OpenLoop,
}

/// Speed estimation, PI regulation and output scaling
#[derive(Debug, Clone)]
pub struct ControlLoop {
    estimator: RpmEstimator,
    pi: PiController,
    flow: FlowModel,
    pwm_resolution: u16,
    voltage_upper: f32,
}

impl ControlLoop {
    /// Build the loop from settings
    pub fn new(settings: &Settings) -> Self {
        let c = &settings.control;
        Self {
            estimator: RpmEstimator::new(settings.rpm_per_tick(), c.alpha),
            pi: PiController::new(PiGains {
                kp: c.kp,
                ki: c.ki,
                integral_min: c.integral_min,
                integral_max: c.integral_max,
            }),
            flow: settings.flow_rate.into(),
            pwm_resolution: c.pwm_resolution,
            voltage_upper: settings.voltage.upper,
        }
    }

    /// Process one encoder sample
    ///
    /// Always updates the RPM estimate. Returns an actuator command only in
    /// closed-loop mode.
    pub fn sample(&mut self, ticks: i16, mode: ControlMode) -> Option<ActuatorCommand> {
        let smoothed = self.estimator.update(ticks);

        match mode {
            ControlMode::ClosedLoop { setpoint_rpm } => {
                let output = self.pi.step(setpoint_rpm - smoothed);
                // Float to int `as` truncates toward zero and saturates
                Some(ActuatorCommand::from_signed(output as i16, self.pwm_resolution))
            }
            ControlMode::OpenLoop => None,
        }
    }

    /// Fixed forward command for a committed voltage
    pub fn voltage_command(&self, volts: f32) -> ActuatorCommand {
        let scaled = volts / self.voltage_upper * f32::from(self.pwm_resolution);
        // Negative and NaN saturate to 0
        let magnitude = (scaled as u16).min(self.pwm_resolution);
        ActuatorCommand {
            magnitude,
            direction: Direction::Forward,
        }
    }

    /// Motor voltage equivalent of an applied command
    pub fn command_voltage(&self, command: ActuatorCommand) -> f32 {
        f32::from(command.magnitude) / f32::from(self.pwm_resolution) * self.voltage_upper
    }

    /// Flow rate at a motor voltage
    pub fn flow_rate(&self, volts: f32) -> f32 {
        self.flow.rate(volts)
    }

    /// Smoothed RPM
    pub fn smoothed_rpm(&self) -> f32 {
        self.estimator.smoothed()
    }

    /// Integral accumulator of the PI stage
    pub fn integral(&self) -> f32 {
        self.pi.integral()
    }

    /// Zero the estimator and the integral
    pub fn reset(&mut self) {
        self.estimator.reset();
        self.pi.reset();
    }
}
