//! Screen and menu definitions
//!
//! ```text
//! Logo -> ControlSelection -> { RpmControl | VoltageControl | About } -> ControlSelection
//! ```
//!
//! `Logo` is only ever the initial state.

use crate::input::Step;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Menu {
    /// Splash bitmap at power-on
    #[default]
    Logo,
    /// Three-item main menu
    ControlSelection,
    /// Closed-loop RPM control
    RpmControl,
    /// Open-loop voltage control
    VoltageControl,
    /// Product and firmware version
    About,
}

impl Menu {
    /// Check if this screen runs the motor
    pub fn is_control(&self) -> bool {
        matches!(self, Menu::RpmControl | Menu::VoltageControl)
    }

    /// Check if knob clicks are meaningful here regardless of edit mode
    pub fn navigable(&self) -> bool {
        matches!(self, Menu::ControlSelection)
    }
}

/// Items of the control selection menu, numbered 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    #[default]
    RpmControl,
    VoltageControl,
    About,
}

impl MenuItem {
    /// Item index as shown on screen (1-3); row 0 is the title
    pub const fn index(self) -> u8 {
        match self {
            MenuItem::RpmControl => 1,
            MenuItem::VoltageControl => 2,
            MenuItem::About => 3,
        }
    }

    /// Next item, wrapping 3 -> 1
    pub const fn next(self) -> Self {
        match self {
            MenuItem::RpmControl => MenuItem::VoltageControl,
            MenuItem::VoltageControl => MenuItem::About,
            MenuItem::About => MenuItem::RpmControl,
        }
    }

    /// Previous item, wrapping 1 -> 3
    pub const fn prev(self) -> Self {
        match self {
            MenuItem::RpmControl => MenuItem::About,
            MenuItem::VoltageControl => MenuItem::RpmControl,
            MenuItem::About => MenuItem::VoltageControl,
        }
    }

    /// Move one item in the knob's direction
    pub const fn step(self, step: Step) -> Self {
        match step {
            Step::Increment => self.next(),
            Step::Decrement => self.prev(),
        }
    }

    /// Screen opened by selecting this item
    pub const fn target(self) -> Menu {
        match self {
            MenuItem::RpmControl => Menu::RpmControl,
            MenuItem::VoltageControl => Menu::VoltageControl,
            MenuItem::About => Menu::About,
        }
    }
}

/// Side effects the controller must perform after a session transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Nothing to do
    None,
    /// Draw the control selection menu; `from` is the screen being left
    EnterMenu { from: Menu },
    /// Move the menu highlight
    MoveHighlight { from: MenuItem, to: MenuItem },
    /// Open a screen from the menu
    Enter(Menu),
    /// Edit mode started; start blinking
    BeginEdit,
    /// Edit buffer changed
    AdjustEdit,
    /// Edit buffer committed; stop blinking, hide the underline
    CommitEdit,
    /// Edit abandoned; stop blinking, hide the underline if it was showing
    CancelEdit { hide_underline: bool },
}
