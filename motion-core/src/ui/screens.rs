//! Screen composers
//!
//! Each composer leaves the panel in basic mode, including on error, so a
//! later text write never lands while the extended instruction set is
//! active.

use super::format::Decimal;
use crate::state::{Menu, MenuItem};
use crate::traits::{Bitmap, DisplayError, GraphicDisplay, ShapeExt};

/// Blank text used to wipe the dynamic fields
const BLANK_ROW: &str = "                ";
const BLANK_HALF_ROW: &str = "        ";

/// Right edge of the setpoint field on row 1
const SETPOINT_END: u8 = 6;
/// Right edge of the measured RPM field on row 1
const RPM_END: u8 = 15;
/// Right edge of the flow rate field on row 3
const FLOW_END: u8 = 7;

/// Product name shown on the menu title and about screen
pub const PRODUCT_NAME: &str = "MOTION MANAGER";

/// Run a bitmap drawing sequence, always returning to basic mode
pub fn with_graphics<D, F>(lcd: &mut D, draw: F) -> Result<(), DisplayError>
where
    D: GraphicDisplay + ?Sized,
    F: FnOnce(&mut D) -> Result<(), DisplayError>,
{
    lcd.set_graphics_mode();
    let result = draw(lcd);
    lcd.set_text_mode();
    result
}

/// Show the power-on splash bitmap
pub fn draw_splash<D: GraphicDisplay + ?Sized>(
    lcd: &mut D,
    logo: &Bitmap,
) -> Result<(), DisplayError> {
    with_graphics(lcd, |lcd| lcd.fill_bitmap(logo))
}

/// Wipe the splash bitmap
pub fn clear_splash<D: GraphicDisplay + ?Sized>(lcd: &mut D) -> Result<(), DisplayError> {
    with_graphics(lcd, |lcd| lcd.clear_bitmap())
}

/// Draw the control selection menu with `item` highlighted
pub fn draw_control_selection<D: GraphicDisplay + ?Sized>(
    lcd: &mut D,
    item: MenuItem,
) -> Result<(), DisplayError> {
    lcd.clear_text();
    with_graphics(lcd, |lcd| {
        lcd.clear_bitmap()?;
        lcd.highlight_title()?;
        lcd.highlight_menu_item(item.index(), true)
    })?;

    lcd.write_str_left(0, 1, PRODUCT_NAME)?;
    lcd.write_str_left(1, 1, "RPM Control")?;
    lcd.write_str_left(2, 1, "Voltage Control")?;
    lcd.write_str_left(3, 1, "About")
}

/// Move the menu highlight between two items
pub fn move_highlight<D: GraphicDisplay + ?Sized>(
    lcd: &mut D,
    from: MenuItem,
    to: MenuItem,
) -> Result<(), DisplayError> {
    with_graphics(lcd, |lcd| {
        lcd.highlight_menu_item(from.index(), false)?;
        lcd.highlight_menu_item(to.index(), true)
    })
}

/// Draw the static chrome of the RPM or voltage control screen
///
/// Other screens draw nothing.
pub fn draw_control_screen<D: GraphicDisplay + ?Sized>(
    lcd: &mut D,
    menu: Menu,
) -> Result<(), DisplayError> {
    let title = match menu {
        Menu::RpmControl => "Ref RPM",
        Menu::VoltageControl => "Voltage",
        _ => return Ok(()),
    };

    lcd.clear_text();
    with_graphics(lcd, |lcd| {
        lcd.clear_bitmap()?;
        lcd.divide_half_inverse_t()?;
        lcd.highlight_top_left()?;
        lcd.highlight_top_right()?;
        lcd.highlight_bottom()
    })?;

    lcd.write_str_left(0, 0, title)?;
    lcd.write_str_left(0, 9, "RPM")?;
    lcd.write_str_left(2, 0, "Flow Rate")?;
    lcd.write_str_right(3, 14, "ml/min")
}

/// Draw the about screen
pub fn draw_about<D: GraphicDisplay + ?Sized>(
    lcd: &mut D,
    version: &str,
) -> Result<(), DisplayError> {
    lcd.clear_text();
    with_graphics(lcd, |lcd| lcd.clear_bitmap())?;

    lcd.write_str_left(0, 1, PRODUCT_NAME)?;
    lcd.write_str_left(1, 0, "Pump Controller")?;
    lcd.write_str_left(3, 0, "Firmware")?;
    lcd.write_str_right(3, 15, version)
}

/// Redraw the three dynamic fields of a control screen
///
/// A field that does not fit is skipped; the others are still drawn and
/// the first error is returned afterwards.
pub fn draw_fields<D: GraphicDisplay + ?Sized>(
    lcd: &mut D,
    setpoint: f32,
    rpm: f32,
    flow_rate: f32,
) -> Result<(), DisplayError> {
    lcd.write_str_left(1, 0, BLANK_ROW)?;
    lcd.write_str_left(3, 0, BLANK_HALF_ROW)?;

    let fields = [
        (1, SETPOINT_END, setpoint),
        (1, RPM_END, rpm),
        (3, FLOW_END, flow_rate),
    ];
    fields
        .iter()
        .map(|&(row, end, value)| lcd.write_str_right(row, end, Decimal::new(value).as_str()))
        .fold(Ok(()), |first, result| first.and(result))
}

/// Show or hide the edit underline
pub fn draw_underline<D: GraphicDisplay + ?Sized>(
    lcd: &mut D,
    visible: bool,
) -> Result<(), DisplayError> {
    with_graphics(lcd, |lcd| lcd.underline(visible))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DisplayMode;

    /// Tracks mode changes and fails every bitmap write
    struct FailingPanel {
        mode: DisplayMode,
        text_writes: u32,
    }

    impl GraphicDisplay for FailingPanel {
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
        }
        fn return_home(&mut self) {}
        fn standby(&mut self) {}
        fn write_str_left(&mut self, _: u8, _: u8, _: &str) -> Result<(), DisplayError> {
            self.text_writes += 1;
            Ok(())
        }
        fn write_str_right(&mut self, _: u8, col: u8, text: &str) -> Result<(), DisplayError> {
            if text.len() > usize::from(col) + 1 {
                return Err(DisplayError::ColumnOutOfRange(col));
            }
            self.text_writes += 1;
            Ok(())
        }
        fn write_char(&mut self, _: u8, _: u8, _: u8) -> Result<(), DisplayError> {
            Ok(())
        }
        fn write_gdram(&mut self, _: u8, _: u8, _: &[u8]) -> Result<(), DisplayError> {
            Err(DisplayError::GraphicsModeRequired)
        }
        fn fill_bitmap(&mut self, _: &Bitmap) -> Result<(), DisplayError> {
            Err(DisplayError::GraphicsModeRequired)
        }
        fn fill_bitmap_turned(&mut self, _: &Bitmap) -> Result<(), DisplayError> {
            Err(DisplayError::GraphicsModeRequired)
        }
        fn clear_bitmap(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    fn panel() -> FailingPanel {
        FailingPanel {
            mode: DisplayMode::Basic,
            text_writes: 0,
        }
    }

    #[test]
    fn test_basic_mode_restored_on_error() {
        let mut lcd = panel();
        assert!(draw_underline(&mut lcd, true).is_err());
        assert_eq!(lcd.mode, DisplayMode::Basic);

        assert!(draw_splash(&mut lcd, &[0; 1024]).is_err());
        assert_eq!(lcd.mode, DisplayMode::Basic);
    }

    #[test]
    fn test_text_skipped_after_chrome_error() {
        let mut lcd = panel();
        assert!(draw_control_screen(&mut lcd, Menu::RpmControl).is_err());
        assert_eq!(lcd.text_writes, 0);
        assert_eq!(lcd.mode, DisplayMode::Basic);
    }

    #[test]
    fn test_non_control_screen_draws_nothing() {
        let mut lcd = panel();
        assert_eq!(draw_control_screen(&mut lcd, Menu::About), Ok(()));
        assert_eq!(lcd.text_writes, 0);
    }

    #[test]
    fn test_oversized_setpoint_keeps_other_fields() {
        let mut lcd = panel();
        // "100000.0" cannot end on column 6
        assert_eq!(
            draw_fields(&mut lcd, 100_000.0, 987.6, 3.0),
            Err(DisplayError::ColumnOutOfRange(SETPOINT_END))
        );
        // two blanking rows plus the RPM and flow fields
        assert_eq!(lcd.text_writes, 4);
    }

    #[test]
    fn test_fields_write_five_texts() {
        let mut lcd = panel();
        draw_fields(&mut lcd, 1200.0, 987.6, 3.0).unwrap();
        assert_eq!(lcd.text_writes, 5);
    }
}
