//! Session state and the menu transition function

use super::events::Event;
use super::machine::{Menu, MenuItem, Transition};
use crate::config::RangeSettings;
use crate::input::Step;

/// A committed setpoint and its edit buffer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Setpoint {
    /// Value in effect
    pub committed: f32,
    /// Value shown while editing
    pub buffer: f32,
}

/// All user-facing state of the controller
///
/// The buffer of the active screen only diverges from its committed value
/// while `editing` is set, and the underline can only be visible while
/// `editing` is set.
#[derive(Debug, Clone)]
pub struct Session {
    menu: Menu,
    item: MenuItem,
    editing: bool,
    underline_visible: bool,
    rpm: Setpoint,
    voltage: Setpoint,
    rpm_range: RangeSettings,
    voltage_range: RangeSettings,
}

impl Session {
    /// Create a session on the splash screen
    pub const fn new(rpm_range: RangeSettings, voltage_range: RangeSettings) -> Self {
        Self {
            menu: Menu::Logo,
            item: MenuItem::RpmControl,
            editing: false,
            underline_visible: false,
            rpm: Setpoint {
                committed: 0.0,
                buffer: 0.0,
            },
            voltage: Setpoint {
                committed: 0.0,
                buffer: 0.0,
            },
            rpm_range,
            voltage_range,
        }
    }

    /// Current screen
    pub fn menu(&self) -> Menu {
        self.menu
    }

    /// Highlighted menu item (meaningful in `ControlSelection` only)
    pub fn item(&self) -> MenuItem {
        self.item
    }

    /// Check if a setpoint is being edited
    pub fn editing(&self) -> bool {
        self.editing
    }

    /// Check if the edit underline is currently drawn
    pub fn underline_visible(&self) -> bool {
        self.underline_visible
    }

    /// RPM setpoint
    pub fn rpm(&self) -> Setpoint {
        self.rpm
    }

    /// Voltage setpoint
    pub fn voltage(&self) -> Setpoint {
        self.voltage
    }

    /// Check if knob edges should reach the decoder
    ///
    /// Outside the menu and outside edit mode the knob has no meaning, and
    /// its edges are dropped without updating the decoder.
    pub fn accepts_knob(&self) -> bool {
        self.editing || self.menu.navigable()
    }

    /// Value shown in the setpoint field of the active control screen
    ///
    /// The edit buffer while editing, the committed value otherwise.
    pub fn field_value(&self) -> Option<f32> {
        let setpoint = match self.menu {
            Menu::RpmControl => self.rpm,
            Menu::VoltageControl => self.voltage,
            _ => return None,
        };
        Some(if self.editing {
            setpoint.buffer
        } else {
            setpoint.committed
        })
    }

    /// Flip the underline blink phase, returning the new visibility
    ///
    /// Returns `None` outside edit mode; a stale blink tick is ignored.
    pub fn toggle_underline(&mut self) -> Option<bool> {
        if !self.editing {
            return None;
        }
        self.underline_visible = !self.underline_visible;
        Some(self.underline_visible)
    }

    /// Zero every setpoint and leave edit mode
    ///
    /// The current screen is kept; callers change it explicitly.
    pub fn reset(&mut self) {
        self.editing = false;
        self.underline_visible = false;
        self.rpm = Setpoint::default();
        self.voltage = Setpoint::default();
    }

    /// Apply an event and report the side effects it requires
    pub fn handle(&mut self, event: Event) -> Transition {
        use Menu::*;

        match (self.menu, event) {
            (Logo, Event::BootComplete) => {
                self.menu = ControlSelection;
                self.item = MenuItem::RpmControl;
                Transition::EnterMenu { from: Logo }
            }

            (ControlSelection, Event::Step(step)) => {
                let from = self.item;
                self.item = from.step(step);
                Transition::MoveHighlight {
                    from,
                    to: self.item,
                }
            }
            (ControlSelection, Event::Select) => {
                self.menu = self.item.target();
                Transition::Enter(self.menu)
            }

            (RpmControl | VoltageControl, Event::Select) if !self.editing => {
                self.editing = true;
                let setpoint = self.active_setpoint();
                setpoint.buffer = setpoint.committed;
                Transition::BeginEdit
            }
            (RpmControl | VoltageControl, Event::Select) => {
                self.editing = false;
                self.underline_visible = false;
                let setpoint = self.active_setpoint();
                setpoint.committed = setpoint.buffer;
                Transition::CommitEdit
            }
            (RpmControl | VoltageControl, Event::Step(step)) if self.editing => {
                let range = if self.menu == RpmControl {
                    self.rpm_range
                } else {
                    self.voltage_range
                };
                let setpoint = self.active_setpoint();
                setpoint.buffer = range.step(setpoint.buffer, step == Step::Increment);
                Transition::AdjustEdit
            }
            (RpmControl | VoltageControl, Event::Back) if self.editing => {
                self.editing = false;
                let hide_underline = self.underline_visible;
                self.underline_visible = false;
                Transition::CancelEdit { hide_underline }
            }
            (from @ (RpmControl | VoltageControl | About), Event::Back) => {
                self.reset();
                self.menu = ControlSelection;
                self.item = MenuItem::RpmControl;
                Transition::EnterMenu { from }
            }

            // Default: ignore
            _ => Transition::None,
        }
    }

    fn active_setpoint(&mut self) -> &mut Setpoint {
        match self.menu {
            Menu::VoltageControl => &mut self.voltage,
            _ => &mut self.rpm,
        }
    }
}
