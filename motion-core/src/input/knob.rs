//! Quadrature rotary knob decoder
//!
//! The knob rests with both contacts open (pulled up), so a detent reads as
//! `A=1, B=1`. One detent-to-detent click walks through all four states.
//! Counting transitions and emitting only at the detent absorbs contact
//! bounce without a time filter.

/// Two-bit sample of the knob pins, `A` in bit 1 and `B` in bit 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinState {
    /// A=0, B=0
    #[default]
    Low = 0,
    /// A=0, B=1
    BOnly = 1,
    /// A=1, B=0
    AOnly = 2,
    /// A=1, B=1 (mechanical resting position)
    Detent = 3,
}

impl PinState {
    /// Build a state from pin levels
    pub const fn from_pins(a: bool, b: bool) -> Self {
        match (a, b) {
            (false, false) => PinState::Low,
            (false, true) => PinState::BOnly,
            (true, false) => PinState::AOnly,
            (true, true) => PinState::Detent,
        }
    }

    /// State that follows this one when turning clockwise
    pub const fn clockwise_next(self) -> Self {
        match self {
            PinState::Low => PinState::AOnly,
            PinState::BOnly => PinState::Low,
            PinState::AOnly => PinState::Detent,
            PinState::Detent => PinState::BOnly,
        }
    }

    /// State that follows this one when turning counter-clockwise
    pub const fn counter_clockwise_next(self) -> Self {
        match self {
            PinState::Low => PinState::BOnly,
            PinState::BOnly => PinState::Detent,
            PinState::AOnly => PinState::Low,
            PinState::Detent => PinState::AOnly,
        }
    }
}

/// One knob click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Clockwise click
    Increment,
    /// Counter-clockwise click
    Decrement,
}

/// Quadrature state machine with a transition accumulator
#[derive(Debug, Clone, Default)]
pub struct QuadratureDecoder {
    prev: PinState,
    count: i16,
}

impl QuadratureDecoder {
    /// Create a decoder expecting the pins to start low
    pub const fn new() -> Self {
        Self {
            prev: PinState::Low,
            count: 0,
        }
    }

    /// Feed one pin sample
    ///
    /// Returns a step only when the sample lands on the detent with a
    /// nonzero accumulated count. The accumulator is cleared at every
    /// detent.
    pub fn update(&mut self, state: PinState) -> Option<Step> {
        if state == self.prev {
            return None;
        }

        if state == self.prev.clockwise_next() {
            self.count = self.count.saturating_add(1);
        } else if state == self.prev.counter_clockwise_next() {
            self.count = self.count.saturating_sub(1);
        }
        self.prev = state;

        if state != PinState::Detent {
            return None;
        }

        let step = match self.count {
            c if c > 0 => Some(Step::Increment),
            c if c < 0 => Some(Step::Decrement),
            _ => None,
        };
        self.count = 0;
        step
    }

    /// Accumulated transitions since the last detent
    pub fn count(&self) -> i16 {
        self.count
    }

    /// Last accepted pin sample
    pub fn previous(&self) -> PinState {
        self.prev
    }
}
