//! The serialized controller context
//!
//! [`MotionManager`] owns every piece of mutable state and every output:
//! session, control loop, knob decoder, debouncer, display, actuator,
//! encoder counter and periodic sources. All triggers are funneled through
//! [`MotionManager::handle`], one at a time, so display mode sequences and
//! session updates can never interleave.

use crate::config::Settings;
use crate::control::{ControlLoop, ControlMode};
use crate::input::{Button, Debouncer, PinState, QuadratureDecoder};
use crate::state::{Event, Menu, Session, Transition, Trigger};
use crate::traits::{
    Actuator, ActuatorCommand, Bitmap, DisplayError, GraphicDisplay, PeriodicTimers,
    TickCounter, TimerId,
};
use crate::ui::screens;

/// Firmware version shown on the about screen
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Controller context
///
/// - `D`: graphic display
/// - `A`: motor actuator
/// - `E`: encoder tick counter
/// - `T`: periodic source control
pub struct MotionManager<D, A, E, T> {
    display: D,
    actuator: A,
    encoder: E,
    timers: T,
    session: Session,
    control: ControlLoop,
    knob: QuadratureDecoder,
    debouncer: Debouncer,
}

impl<D, A, E, T> MotionManager<D, A, E, T>
where
    D: GraphicDisplay,
    A: Actuator,
    E: TickCounter,
    T: PeriodicTimers,
{
    /// Build the context on the splash screen
    ///
    /// `settings` should already be validated.
    pub fn new(display: D, actuator: A, encoder: E, timers: T, settings: &Settings) -> Self {
        Self {
            display,
            actuator,
            encoder,
            timers,
            session: Session::new(settings.rpm, settings.voltage),
            control: ControlLoop::new(settings),
            knob: QuadratureDecoder::new(),
            debouncer: Debouncer::new(settings.timing.debounce_ms),
        }
    }

    /// Draw the splash bitmap
    pub fn show_logo(&mut self, logo: &Bitmap) -> Result<(), DisplayError> {
        screens::draw_splash(&mut self.display, logo)
    }

    /// Clear the splash and open the control selection menu
    pub fn boot_complete(&mut self) -> Result<(), DisplayError> {
        screens::clear_splash(&mut self.display)?;
        self.dispatch(Event::BootComplete)
    }

    /// Process one trigger from any source
    pub fn handle(&mut self, trigger: Trigger) -> Result<(), DisplayError> {
        match trigger {
            Trigger::Tick(TimerId::Sample) => {
                self.on_sample_tick();
                Ok(())
            }
            Trigger::Tick(TimerId::Refresh) => self.on_refresh_tick(),
            Trigger::Tick(TimerId::Blink) => self.on_blink_tick(),
            Trigger::Knob(state) => self.on_knob(state),
            Trigger::Button { button, at_ms } => self.on_button(button, at_ms),
        }
    }

    /// Sample the encoder and run the control loop
    ///
    /// Ticks that arrive outside the control screens are ignored.
    pub fn on_sample_tick(&mut self) {
        let mode = match self.session.menu() {
            Menu::RpmControl => ControlMode::ClosedLoop {
                setpoint_rpm: self.session.rpm().committed,
            },
            Menu::VoltageControl => ControlMode::OpenLoop,
            _ => return,
        };

        let ticks = self.encoder.count();
        if let Some(command) = self.control.sample(ticks, mode) {
            self.actuator.apply(command);
        }
    }

    /// Redraw the setpoint, RPM and flow rate fields
    pub fn on_refresh_tick(&mut self) -> Result<(), DisplayError> {
        let Some(setpoint) = self.session.field_value() else {
            return Ok(());
        };

        let volts = if self.session.menu() == Menu::VoltageControl {
            self.session.voltage().committed
        } else {
            self.control.command_voltage(self.actuator.command())
        };
        let flow = self.control.flow_rate(volts);

        screens::draw_fields(
            &mut self.display,
            setpoint,
            self.control.smoothed_rpm(),
            flow,
        )
    }

    /// Toggle the edit underline
    pub fn on_blink_tick(&mut self) -> Result<(), DisplayError> {
        match self.session.toggle_underline() {
            Some(visible) => screens::draw_underline(&mut self.display, visible),
            None => Ok(()),
        }
    }

    /// Feed a knob pin sample through the quadrature decoder
    pub fn on_knob(&mut self, state: PinState) -> Result<(), DisplayError> {
        if !self.session.accepts_knob() {
            return Ok(());
        }
        match self.knob.update(state) {
            Some(step) => self.dispatch(Event::Step(step)),
            None => Ok(()),
        }
    }

    /// Debounce a button edge and dispatch it
    pub fn on_button(&mut self, button: Button, at_ms: u32) -> Result<(), DisplayError> {
        if !self.debouncer.accept(at_ms) {
            return Ok(());
        }
        self.dispatch(button.into())
    }

    /// Apply a decoded event to the session and carry out its effects
    pub fn dispatch(&mut self, event: Event) -> Result<(), DisplayError> {
        let transition = self.session.handle(event);
        #[cfg(feature = "defmt")]
        if transition != Transition::None {
            defmt::debug!("{} -> {}", event, transition);
        }

        match transition {
            Transition::None | Transition::AdjustEdit => Ok(()),
            Transition::EnterMenu { from } => {
                if from.is_control() {
                    self.stop_motor();
                }
                screens::draw_control_selection(&mut self.display, self.session.item())
            }
            Transition::MoveHighlight { from, to } => {
                screens::move_highlight(&mut self.display, from, to)
            }
            Transition::Enter(menu) if menu.is_control() => {
                self.encoder.set_enabled(true);
                self.actuator.enable(true);
                self.timers.start(TimerId::Sample);
                self.timers.start(TimerId::Refresh);
                screens::draw_control_screen(&mut self.display, menu)
            }
            Transition::Enter(Menu::About) => screens::draw_about(&mut self.display, VERSION),
            Transition::Enter(_) => Ok(()),
            Transition::BeginEdit => {
                self.timers.start(TimerId::Blink);
                Ok(())
            }
            Transition::CommitEdit => {
                self.timers.stop(TimerId::Blink);
                if self.session.menu() == Menu::VoltageControl {
                    let command = self.control.voltage_command(self.session.voltage().committed);
                    self.actuator.apply(command);
                }
                screens::draw_underline(&mut self.display, false)
            }
            Transition::CancelEdit { hide_underline } => {
                self.timers.stop(TimerId::Blink);
                if hide_underline {
                    screens::draw_underline(&mut self.display, false)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Stop sampling, zero the output and the counter
    fn stop_motor(&mut self) {
        for id in TimerId::ALL {
            self.timers.stop(id);
        }
        self.control.reset();
        self.actuator.apply(ActuatorCommand::STOP);
        self.actuator.enable(false);
        self.encoder.reset();
        self.encoder.set_enabled(false);
    }

    /// Session state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Control loop state
    pub fn control(&self) -> &ControlLoop {
        &self.control
    }

    /// Display driver
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Actuator
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Encoder counter
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Periodic source control
    pub fn timers(&self) -> &T {
        &self.timers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Step;
    use crate::state::session::Setpoint;
    use crate::state::MenuItem;
    use crate::traits::{DisplayMode, Direction};
    use heapless::{String, Vec};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Text {
            row: u8,
            col: u8,
            text: String<20>,
            right: bool,
        },
        Gdram {
            v: u8,
            h: u8,
            data: Vec<u8, 8>,
        },
        ClearText,
        ClearBitmap,
        FillBitmap,
    }

    /// Display that records operations and enforces instruction set rules
    struct MockDisplay {
        mode: DisplayMode,
        ops: Vec<Op, 4096>,
        violations: u32,
    }

    impl MockDisplay {
        fn new() -> Self {
            Self {
                mode: DisplayMode::Basic,
                ops: Vec::new(),
                violations: 0,
            }
        }

        fn text(&mut self, row: u8, col: u8, text: &str, right: bool) -> Result<(), DisplayError> {
            if !self.mode.text_ready() {
                self.violations += 1;
                return Err(DisplayError::TextModeRequired);
            }
            let text = String::try_from(text).unwrap();
            self.ops
                .push(Op::Text {
                    row,
                    col,
                    text,
                    right,
                })
                .unwrap();
            Ok(())
        }

        fn graphics(&mut self, op: Op) -> Result<(), DisplayError> {
            if !self.mode.graphics_ready() {
                self.violations += 1;
                return Err(DisplayError::GraphicsModeRequired);
            }
            self.ops.push(op).unwrap();
            Ok(())
        }

        fn has_text(&self, row: u8, col: u8, text: &str) -> bool {
            self.ops.iter().any(|op| {
                matches!(op, Op::Text { row: r, col: c, text: t, .. }
                    if *r == row && *c == col && t.as_str() == text)
            })
        }

        fn gdram_at(&self, v: u8, h: u8) -> Option<&Vec<u8, 8>> {
            self.ops.iter().rev().find_map(|op| match op {
                Op::Gdram { v: ov, h: oh, data } if *ov == v && *oh == h => Some(data),
                _ => None,
            })
        }
    }

    impl GraphicDisplay for MockDisplay {
        fn mode(&self) -> DisplayMode {
            self.mode
        }
        fn set_text_mode(&mut self) {
            self.mode = DisplayMode::Basic;
        }
        fn set_graphics_mode(&mut self) {
            self.mode = DisplayMode::Extended { graphics_on: true };
        }
        fn clear_text(&mut self) {
            self.mode = DisplayMode::Basic;
            self.ops.push(Op::ClearText).unwrap();
        }
        fn return_home(&mut self) {
            self.mode = DisplayMode::Basic;
        }
        fn standby(&mut self) {
            self.mode = DisplayMode::Extended { graphics_on: false };
        }
        fn write_str_left(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
            self.text(row, col, text, false)
        }
        fn write_str_right(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
            self.text(row, col, text, true)
        }
        fn write_char(&mut self, row: u8, col: u8, ch: u8) -> Result<(), DisplayError> {
            let buf = [ch];
            let s = core::str::from_utf8(&buf).unwrap();
            self.text(row, col, s, false)
        }
        fn write_gdram(&mut self, v: u8, h: u8, data: &[u8]) -> Result<(), DisplayError> {
            let data = Vec::from_slice(data).unwrap();
            self.graphics(Op::Gdram { v, h, data })
        }
        fn fill_bitmap(&mut self, _: &Bitmap) -> Result<(), DisplayError> {
            self.graphics(Op::FillBitmap)
        }
        fn fill_bitmap_turned(&mut self, _: &Bitmap) -> Result<(), DisplayError> {
            self.graphics(Op::FillBitmap)
        }
        fn clear_bitmap(&mut self) -> Result<(), DisplayError> {
            self.graphics(Op::ClearBitmap)
        }
    }

    struct MockActuator {
        command: ActuatorCommand,
        enabled: bool,
        applied: u32,
    }

    impl Actuator for MockActuator {
        fn apply(&mut self, command: ActuatorCommand) {
            self.command = ActuatorCommand {
                magnitude: command.magnitude.min(2048),
                ..command
            };
            self.applied += 1;
        }
        fn enable(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
        fn is_enabled(&self) -> bool {
            self.enabled
        }
        fn max_magnitude(&self) -> u16 {
            2048
        }
        fn command(&self) -> ActuatorCommand {
            self.command
        }
    }

    struct MockCounter {
        value: i16,
        enabled: bool,
        resets: u32,
    }

    impl TickCounter for MockCounter {
        fn count(&mut self) -> i16 {
            self.value
        }
        fn reset(&mut self) {
            self.value = 0;
            self.resets += 1;
        }
        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
    }

    #[derive(Default)]
    struct MockTimers {
        running: [bool; 3],
    }

    impl PeriodicTimers for MockTimers {
        fn start(&mut self, id: TimerId) {
            self.running[id.index()] = true;
        }
        fn stop(&mut self, id: TimerId) {
            self.running[id.index()] = false;
        }
        fn is_running(&self, id: TimerId) -> bool {
            self.running[id.index()]
        }
    }

    type Manager = MotionManager<MockDisplay, MockActuator, MockCounter, MockTimers>;

    /// Harness tracking a millisecond clock for button presses
    struct Bench {
        mgr: Manager,
        now_ms: u32,
    }

    impl Bench {
        /// Splash drawn, boot not yet complete
        fn on_splash(settings: Settings) -> Self {
            let mut mgr = MotionManager::new(
                MockDisplay::new(),
                MockActuator {
                    command: ActuatorCommand::STOP,
                    enabled: false,
                    applied: 0,
                },
                MockCounter {
                    value: 0,
                    enabled: false,
                    resets: 0,
                },
                MockTimers::default(),
                &settings,
            );
            mgr.show_logo(&[0xAA; 1024]).unwrap();
            Self { mgr, now_ms: 0 }
        }

        fn with_settings(settings: Settings) -> Self {
            let mut bench = Self::on_splash(settings);
            bench.mgr.boot_complete().unwrap();
            // Knob at rest
            bench.mgr.on_knob(PinState::Detent).unwrap();
            bench
        }

        fn new() -> Self {
            Self::with_settings(Settings::default())
        }

        fn press(&mut self, button: Button) {
            self.now_ms += 500;
            self.mgr.handle(Trigger::Button {
                button,
                at_ms: self.now_ms,
            })
            .unwrap();
        }

        fn click(&mut self, step: Step) {
            let mut s = PinState::Detent;
            for _ in 0..4 {
                s = match step {
                    Step::Increment => s.clockwise_next(),
                    Step::Decrement => s.counter_clockwise_next(),
                };
                self.mgr.handle(Trigger::Knob(s)).unwrap();
            }
        }

        fn clicks(&mut self, step: Step, n: usize) {
            for _ in 0..n {
                self.click(step);
            }
        }

        fn tick(&mut self, id: TimerId) {
            self.mgr.handle(Trigger::Tick(id)).unwrap();
        }

        fn open(&mut self, item: MenuItem) {
            while self.mgr.session().item() != item {
                self.click(Step::Increment);
            }
            self.press(Button::Select);
        }

        fn display(&mut self) -> &mut MockDisplay {
            &mut self.mgr.display
        }
    }

    #[test]
    fn test_boot_shows_menu() {
        let mut bench = Bench::new();
        let mgr = &bench.mgr;
        assert_eq!(mgr.session().menu(), Menu::ControlSelection);
        assert!(mgr.display().ops.contains(&Op::FillBitmap));
        assert!(mgr.display().has_text(0, 1, "MOTION MANAGER"));
        assert!(mgr.display().has_text(3, 1, "About"));
        // Item 1 highlighted: top edge on line 16 of the upper page
        assert_eq!(
            mgr.display().gdram_at(16, 0).map(|d| d.as_slice()),
            Some(&[0xFF, 0xFF][..])
        );
        assert_eq!(bench.display().mode, DisplayMode::Basic);
        assert_eq!(bench.display().violations, 0);
    }

    #[test]
    fn test_input_during_splash_is_dropped() {
        let mut bench = Bench::on_splash(Settings::default());
        bench.clicks(Step::Decrement, 2);
        bench.press(Button::Select);
        bench.press(Button::Back);
        assert_eq!(bench.mgr.session().menu(), Menu::Logo);
        assert!(!bench.mgr.actuator().is_enabled());
        assert!(!bench.mgr.timers().is_running(TimerId::Sample));

        bench.mgr.boot_complete().unwrap();
        assert_eq!(bench.mgr.session().menu(), Menu::ControlSelection);
        assert_eq!(bench.mgr.session().item(), MenuItem::RpmControl);
        assert!(!bench.mgr.actuator().is_enabled());
        assert!(!bench.mgr.timers().is_running(TimerId::Refresh));
    }

    #[test]
    fn test_menu_wraps_with_knob() {
        let mut bench = Bench::new();
        bench.display().ops.clear();

        bench.click(Step::Decrement);
        assert_eq!(bench.mgr.session().item().index(), 3);
        // Old item erased, item 3 drawn on the lower page (line 48 = 16 + 32)
        assert_eq!(
            bench.display().gdram_at(16, 0x00).map(|d| d.as_slice()),
            Some(&[0x00, 0x00][..])
        );
        assert_eq!(
            bench.display().gdram_at(16, 0x08).map(|d| d.as_slice()),
            Some(&[0xFF, 0xFF][..])
        );

        bench.click(Step::Increment);
        assert_eq!(bench.mgr.session().item().index(), 1);
        assert_eq!(bench.display().mode, DisplayMode::Basic);
        assert_eq!(bench.display().violations, 0);
    }

    #[test]
    fn test_enter_rpm_control_starts_sources() {
        let mut bench = Bench::new();
        bench.open(MenuItem::RpmControl);

        let mgr = &bench.mgr;
        assert_eq!(mgr.session().menu(), Menu::RpmControl);
        assert!(mgr.timers().is_running(TimerId::Sample));
        assert!(mgr.timers().is_running(TimerId::Refresh));
        assert!(!mgr.timers().is_running(TimerId::Blink));
        assert!(mgr.actuator().is_enabled());
        assert!(mgr.encoder().enabled);
        assert!(mgr.display().has_text(0, 0, "Ref RPM"));
        assert!(mgr.display().has_text(3, 14, "ml/min"));
    }

    #[test]
    fn test_end_to_end_pi_output() {
        let mut settings = Settings::default();
        // One count per sample is exactly 5 RPM, no smoothing
        settings.encoder.pulses_per_rev = 300.0;
        settings.control.alpha = 1.0;

        let mut bench = Bench::with_settings(settings);
        bench.open(MenuItem::RpmControl);

        bench.press(Button::Select);
        bench.clicks(Step::Increment, 12);
        bench.press(Button::Select);
        assert_eq!(bench.mgr.session().rpm().committed, 1200.0);

        // 200 counts in one sample: 1000 RPM against a 1200 RPM setpoint
        bench.mgr.encoder.value = 200;
        bench.tick(TimerId::Sample);

        assert_eq!(bench.mgr.control().smoothed_rpm(), 1000.0);
        assert_eq!(bench.mgr.control().integral(), 2.0);
        let cmd = bench.mgr.actuator().command();
        assert_eq!(cmd.magnitude, 6);
        assert_eq!(cmd.direction, Direction::Forward);
    }

    #[test]
    fn test_edit_round_trip_keeps_setpoint() {
        let mut bench = Bench::new();
        bench.open(MenuItem::RpmControl);

        bench.press(Button::Select);
        bench.clicks(Step::Increment, 5);
        bench.press(Button::Select);
        assert_eq!(bench.mgr.session().rpm().committed, 500.0);

        bench.press(Button::Select);
        assert!(bench.mgr.timers().is_running(TimerId::Blink));
        bench.press(Button::Select);
        assert_eq!(bench.mgr.session().rpm().committed, 500.0);
        assert!(!bench.mgr.timers().is_running(TimerId::Blink));
    }

    #[test]
    fn test_bouncing_select_ignored() {
        let mut bench = Bench::new();
        bench.open(MenuItem::RpmControl);

        bench.press(Button::Select);
        assert!(bench.mgr.session().editing());

        // Chatter 100 ms later does not leave edit mode
        let at_ms = bench.now_ms + 100;
        bench
            .mgr
            .handle(Trigger::Button {
                button: Button::Select,
                at_ms,
            })
            .unwrap();
        assert!(bench.mgr.session().editing());
    }

    #[test]
    fn test_knob_ignored_outside_edit() {
        let mut bench = Bench::new();
        bench.open(MenuItem::RpmControl);

        let before = bench.mgr.knob.previous();
        bench.mgr.handle(Trigger::Knob(PinState::BOnly)).unwrap();
        assert_eq!(bench.mgr.knob.previous(), before);
        assert_eq!(bench.mgr.session().rpm(), Setpoint::default());
    }

    #[test]
    fn test_refresh_draws_fields() {
        let mut bench = Bench::new();
        bench.open(MenuItem::RpmControl);
        bench.press(Button::Select);
        bench.clicks(Step::Increment, 12);
        bench.display().ops.clear();

        bench.tick(TimerId::Refresh);
        let display = bench.display();
        assert!(display.has_text(1, 0, "                "));
        assert!(display.has_text(3, 0, "        "));
        // Edit buffer shown while editing
        assert!(display.has_text(1, 6, "1200.0"));
        assert!(display.has_text(1, 15, "0.0"));
        assert!(display.has_text(3, 7, "0.0"));
        assert_eq!(display.violations, 0);
    }

    #[test]
    fn test_blink_toggles_underline() {
        let mut bench = Bench::new();
        bench.open(MenuItem::VoltageControl);

        // Not editing: blink tick is stale and draws nothing
        bench.display().ops.clear();
        bench.tick(TimerId::Blink);
        assert!(bench.display().ops.is_empty());

        bench.press(Button::Select);
        bench.tick(TimerId::Blink);
        assert_eq!(bench.display().gdram_at(29, 0).map(|d| d[0]), Some(0x7F));
        assert!(bench.mgr.session().underline_visible());

        bench.tick(TimerId::Blink);
        assert_eq!(bench.display().gdram_at(29, 0).map(|d| d[0]), Some(0x00));

        bench.tick(TimerId::Blink);
        bench.press(Button::Select);
        assert_eq!(bench.display().gdram_at(29, 0).map(|d| d[0]), Some(0x00));
        assert!(!bench.mgr.session().underline_visible());
        assert_eq!(bench.display().mode, DisplayMode::Basic);
        assert_eq!(bench.display().violations, 0);
    }

    #[test]
    fn test_back_cancels_edit() {
        let mut bench = Bench::new();
        bench.open(MenuItem::RpmControl);
        bench.press(Button::Select);
        bench.clicks(Step::Increment, 3);
        bench.tick(TimerId::Blink);

        bench.press(Button::Back);
        let mgr = &bench.mgr;
        assert_eq!(mgr.session().menu(), Menu::RpmControl);
        assert!(!mgr.session().editing());
        assert_eq!(mgr.session().rpm().committed, 0.0);
        assert!(!mgr.timers().is_running(TimerId::Blink));
        assert_eq!(mgr.display().gdram_at(29, 0).map(|d| d[0]), Some(0x00));
    }

    #[test]
    fn test_back_stops_and_resets() {
        let mut bench = Bench::new();
        bench.open(MenuItem::RpmControl);
        bench.press(Button::Select);
        bench.clicks(Step::Increment, 10);
        bench.press(Button::Select);
        bench.mgr.encoder.value = 40;
        bench.tick(TimerId::Sample);
        assert!(bench.mgr.actuator().command().magnitude > 0);

        bench.press(Button::Back);
        let mgr = &bench.mgr;
        assert_eq!(mgr.session().menu(), Menu::ControlSelection);
        assert_eq!(mgr.session().item().index(), 1);
        assert_eq!(mgr.session().rpm().committed, 0.0);
        assert_eq!(mgr.control().smoothed_rpm(), 0.0);
        assert_eq!(mgr.control().integral(), 0.0);
        assert_eq!(mgr.actuator().command(), ActuatorCommand::STOP);
        assert!(!mgr.actuator().is_enabled());
        assert_eq!(mgr.encoder().value, 0);
        assert!(mgr.encoder().resets > 0);
        assert!(!mgr.encoder().enabled);
        for id in TimerId::ALL {
            assert!(!mgr.timers().is_running(id));
        }
    }

    #[test]
    fn test_stale_sample_tick_ignored() {
        let mut bench = Bench::new();
        bench.mgr.encoder.value = 100;
        bench.tick(TimerId::Sample);
        assert_eq!(bench.mgr.actuator().applied, 0);
        assert_eq!(bench.mgr.control().smoothed_rpm(), 0.0);
    }

    #[test]
    fn test_voltage_commit_applies_output() {
        let mut settings = Settings::default();
        settings.voltage.resolution = 1.0;
        settings.flow_rate.b = 2.0;
        settings.flow_rate.c = 1.0;

        let mut bench = Bench::with_settings(settings);
        bench.open(MenuItem::VoltageControl);
        bench.press(Button::Select);
        bench.clicks(Step::Increment, 12);
        assert_eq!(bench.mgr.actuator().applied, 0);
        bench.press(Button::Select);

        let cmd = bench.mgr.actuator().command();
        assert_eq!(cmd.magnitude, 1024);
        assert_eq!(cmd.direction, Direction::Forward);

        // Sample ticks measure but leave the output alone
        let applied = bench.mgr.actuator().applied;
        bench.mgr.encoder.value = 10;
        bench.tick(TimerId::Sample);
        assert_eq!(bench.mgr.actuator().applied, applied);
        assert!(bench.mgr.control().smoothed_rpm() > 0.0);

        bench.tick(TimerId::Refresh);
        assert!(bench.display().has_text(1, 6, "12.0"));
        assert!(bench.display().has_text(3, 7, "25.0"));
    }

    #[test]
    fn test_rpm_flow_uses_applied_output() {
        let mut settings = Settings::default();
        settings.flow_rate.b = 1.0;
        let mut bench = Bench::with_settings(settings);
        bench.open(MenuItem::RpmControl);

        bench.mgr.actuator.apply(ActuatorCommand {
            magnitude: 1024,
            direction: Direction::Forward,
        });
        bench.tick(TimerId::Refresh);
        // Half of full scale on a 24 V supply
        assert!(bench.display().has_text(3, 7, "12.0"));
    }

    #[test]
    fn test_about_and_back() {
        let mut bench = Bench::new();
        bench.open(MenuItem::About);
        assert_eq!(bench.mgr.session().menu(), Menu::About);
        assert!(bench.display().has_text(3, 15, VERSION));
        assert!(!bench.mgr.timers().is_running(TimerId::Sample));

        // Knob and select do nothing here
        bench.click(Step::Increment);
        bench.press(Button::Select);
        assert_eq!(bench.mgr.session().menu(), Menu::About);

        bench.press(Button::Back);
        assert_eq!(bench.mgr.session().menu(), Menu::ControlSelection);
        assert_eq!(bench.display().violations, 0);
    }
}
