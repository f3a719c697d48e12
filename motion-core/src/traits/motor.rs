//! Motor actuator traits
//!
//! The pump motor is driven by a single PWM channel plus a direction line.
//! The control loop produces signed outputs; this module defines how they
//! reach the hardware.

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Pumping direction (direction line low)
    #[default]
    Forward,
    /// Reverse direction (direction line high)
    Reverse,
}

/// A duty magnitude and direction pair ready for the output stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorCommand {
    /// Duty in actuator units, 0..=`Actuator::max_magnitude()`
    pub magnitude: u16,
    /// Rotation direction
    pub direction: Direction,
}

impl ActuatorCommand {
    /// Zero output, forward
    pub const STOP: Self = Self {
        magnitude: 0,
        direction: Direction::Forward,
    };

    /// Map a signed actuator value to a command
    ///
    /// Positive values run forward; zero and negative values select reverse.
    /// The magnitude saturates at `max`.
    pub fn from_signed(value: i16, max: u16) -> Self {
        let direction = if value > 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        Self {
            magnitude: value.unsigned_abs().min(max),
            direction,
        }
    }
}

/// Trait for the PWM motor output stage
pub trait Actuator {
    /// Apply duty and direction
    ///
    /// Magnitudes above [`Actuator::max_magnitude`] are clamped.
    fn apply(&mut self, command: ActuatorCommand);

    /// Enable or disable the PWM output
    ///
    /// When disabled the motor coasts regardless of the last command.
    fn enable(&mut self, enabled: bool);

    /// Check if the output is enabled
    fn is_enabled(&self) -> bool;

    /// Full-scale magnitude (PWM resolution)
    fn max_magnitude(&self) -> u16;

    /// Most recently applied command
    fn command(&self) -> ActuatorCommand;
}
