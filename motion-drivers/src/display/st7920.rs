//! ST7920 128x64 graphic LCD driver (serial mode)
//!
//! The serial interface is write-only: no busy flag can be read back, so
//! every byte is followed by a fixed settle delay long enough for the
//! slowest instruction of its kind. Each byte goes out as three frames:
//!
//! ```text
//! sync   1 1 1 1 1 RW RS 0    (0xF8 instruction, 0xFA data)
//! high   D7 D6 D5 D4 0 0 0 0
//! low    D3 D2 D1 D0 0 0 0 0
//! ```

use embedded_hal::delay::DelayNs;
use motion_core::traits::display::{TEXT_COLUMNS, TEXT_ROWS};
use motion_core::traits::{Bitmap, DisplayError, DisplayMode, GraphicDisplay, BITMAP_LEN};
use motion_hal::SerialTx;

/// ST7920 instructions
mod cmd {
    /// Clear DDRAM (basic set)
    pub const CLEAR: u8 = 0x01;
    /// Return home (basic set)
    pub const HOME: u8 = 0x02;
    /// Cursor moves right, no display shift
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// 8-bit interface, basic instruction set
    pub const FUNCTION_BASIC: u8 = 0x30;
    /// 8-bit interface, extended instruction set, graphics off
    pub const FUNCTION_EXTENDED: u8 = 0x34;
    /// 8-bit interface, extended instruction set, graphics on
    pub const FUNCTION_GRAPHICS: u8 = 0x36;
    /// Standby (extended set); shares its code with CLEAR
    pub const STANDBY: u8 = 0x01;
    /// Set GDRAM address (extended set), vertical then horizontal
    pub const SET_GDRAM_ADDR: u8 = 0x80;
}

/// Sync byte for an instruction write
const SYNC_INSTRUCTION: u8 = 0xF8;

/// Sync byte for a RAM data write
const SYNC_DATA: u8 = 0xFA;

/// Settle time after any data write or ordinary instruction
const SETTLE_US: u32 = 72;

/// Settle time after code 0x01 (clear or standby)
const CLEAR_SETTLE_US: u32 = 1600;

/// DDRAM base address of each text row
const ROW_BASE: [u8; TEXT_ROWS as usize] = [0x80, 0x90, 0x88, 0x98];

/// GDRAM geometry: two pages of 32 lines, 16 bytes per line
const PAGES: usize = 2;
const LINES_PER_PAGE: usize = 32;
const BYTES_PER_LINE: usize = 16;

/// Horizontal address bit selecting the lower page
const LOWER_PAGE: u8 = 0x08;

/// ST7920 driver over a write-only serial link
///
/// Tracks the selected instruction set so that text and bitmap operations
/// issued in the wrong mode are rejected before anything is sent.
pub struct St7920<T, D> {
    bus: T,
    delay: D,
    mode: DisplayMode,
}

impl<T, D> St7920<T, D>
where
    T: SerialTx,
    D: DelayNs,
{
    /// Create a driver; call [`St7920::init`] before drawing
    pub fn new(bus: T, delay: D) -> Self {
        Self {
            bus,
            delay,
            mode: DisplayMode::Basic,
        }
    }

    /// Run the power-on initialization sequence
    ///
    /// The function set is sent twice: the controller may miss the first
    /// one while its interface is still coming up.
    pub fn init(&mut self) {
        self.delay.delay_ms(40);

        self.send_instruction(cmd::FUNCTION_BASIC);
        self.delay.delay_us(100);

        self.send_instruction(cmd::FUNCTION_BASIC);
        self.delay.delay_us(37);

        self.send_instruction(cmd::DISPLAY_ON);
        self.delay.delay_us(100);

        self.send_instruction(cmd::CLEAR);
        self.delay.delay_ms(10);

        self.send_instruction(cmd::ENTRY_MODE_INCREMENT);
        self.mode = DisplayMode::Basic;
    }

    /// Send one instruction and wait for it to settle
    pub fn send_instruction(&mut self, command: u8) {
        self.send_frame(SYNC_INSTRUCTION, command);
        let settle = if command == cmd::CLEAR {
            CLEAR_SETTLE_US
        } else {
            SETTLE_US
        };
        self.delay.delay_us(settle);
    }

    /// Send one byte to the active RAM and wait for it to settle
    pub fn send_data(&mut self, data: u8) {
        self.send_frame(SYNC_DATA, data);
        self.delay.delay_us(SETTLE_US);
    }

    fn send_frame(&mut self, sync: u8, byte: u8) {
        self.bus.transmit_all(&[sync, byte & 0xF0, byte << 4]);
    }

    fn require_text(&self) -> Result<(), DisplayError> {
        if self.mode.text_ready() {
            Ok(())
        } else {
            Err(DisplayError::TextModeRequired)
        }
    }

    fn require_graphics(&self) -> Result<(), DisplayError> {
        if self.mode.graphics_ready() {
            Ok(())
        } else {
            Err(DisplayError::GraphicsModeRequired)
        }
    }

    /// Point DDRAM at a half-width column, padding odd columns
    ///
    /// DDRAM addresses full-width (16 px) cells, so an odd column starts
    /// with a space in the left half of its cell.
    fn set_text_position(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        let base = *ROW_BASE
            .get(usize::from(row))
            .ok_or(DisplayError::RowOutOfRange(row))?;
        if col >= TEXT_COLUMNS {
            return Err(DisplayError::ColumnOutOfRange(col));
        }

        self.send_instruction(base | (col / 2));
        if col % 2 == 1 {
            self.send_data(b' ');
        }
        Ok(())
    }

    fn set_gdram_position(&mut self, vertical: u8, horizontal: u8) {
        self.send_instruction(cmd::SET_GDRAM_ADDR | vertical);
        self.send_instruction(cmd::SET_GDRAM_ADDR | horizontal);
    }

    /// Release the bus and delay
    pub fn release(self) -> (T, D) {
        (self.bus, self.delay)
    }
}

impl<T, D> GraphicDisplay for St7920<T, D>
where
    T: SerialTx,
    D: DelayNs,
{
    fn mode(&self) -> DisplayMode {
        self.mode
    }

    fn set_text_mode(&mut self) {
        self.send_instruction(cmd::FUNCTION_BASIC);
        self.mode = DisplayMode::Basic;
    }

    fn set_graphics_mode(&mut self) {
        // RE must be set before G can be changed
        self.send_instruction(cmd::FUNCTION_EXTENDED);
        self.send_instruction(cmd::FUNCTION_GRAPHICS);
        self.mode = DisplayMode::Extended { graphics_on: true };
    }

    fn clear_text(&mut self) {
        self.send_instruction(cmd::FUNCTION_BASIC);
        self.send_instruction(cmd::CLEAR);
        self.mode = DisplayMode::Basic;
    }

    fn return_home(&mut self) {
        self.send_instruction(cmd::FUNCTION_BASIC);
        self.send_instruction(cmd::HOME);
        self.mode = DisplayMode::Basic;
    }

    fn standby(&mut self) {
        self.send_instruction(cmd::FUNCTION_EXTENDED);
        self.send_instruction(cmd::STANDBY);
        self.mode = DisplayMode::Extended { graphics_on: false };
    }

    fn write_str_left(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.require_text()?;
        self.set_text_position(row, col)?;
        for &b in text.as_bytes() {
            self.send_data(b);
        }
        Ok(())
    }

    fn write_str_right(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        // An empty string still addresses `col`
        let start = (usize::from(col) + 1)
            .checked_sub(text.len().max(1))
            .ok_or(DisplayError::ColumnOutOfRange(col))?;
        self.write_str_left(row, start as u8, text)
    }

    fn write_char(&mut self, row: u8, col: u8, ch: u8) -> Result<(), DisplayError> {
        self.require_text()?;
        self.set_text_position(row, col)?;
        self.send_data(ch);
        Ok(())
    }

    fn write_gdram(&mut self, vertical: u8, horizontal: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.require_graphics()?;
        self.set_gdram_position(vertical, horizontal);
        for &b in data {
            self.send_data(b);
        }
        Ok(())
    }

    fn fill_bitmap(&mut self, bitmap: &Bitmap) -> Result<(), DisplayError> {
        self.require_graphics()?;
        for page in 0..PAGES {
            for line in 0..LINES_PER_PAGE {
                self.set_gdram_position(line as u8, if page == 0 { 0 } else { LOWER_PAGE });
                let offset = (page * LINES_PER_PAGE + line) * BYTES_PER_LINE;
                for &b in &bitmap[offset..offset + BYTES_PER_LINE] {
                    self.send_data(b);
                }
            }
        }
        Ok(())
    }

    fn fill_bitmap_turned(&mut self, bitmap: &Bitmap) -> Result<(), DisplayError> {
        self.require_graphics()?;
        for page in 0..PAGES {
            for line in 0..LINES_PER_PAGE {
                self.set_gdram_position(line as u8, if page == 0 { 0 } else { LOWER_PAGE });
                let y = page * LINES_PER_PAGE + line;
                let mask = 1u8 << (line % 8);
                for k in 0..BYTES_PER_LINE {
                    let base = (y / 8) * 128 + k * 8;
                    let byte = (0..8).fold(0u8, |acc, m| {
                        if bitmap[base + m] & mask != 0 {
                            acc | (0x80 >> m)
                        } else {
                            acc
                        }
                    });
                    self.send_data(byte);
                }
            }
        }
        Ok(())
    }

    fn clear_bitmap(&mut self) -> Result<(), DisplayError> {
        self.require_graphics()?;
        for page in 0..PAGES {
            for line in 0..LINES_PER_PAGE {
                self.set_gdram_position(line as u8, if page == 0 { 0 } else { LOWER_PAGE });
                for _ in 0..BYTES_PER_LINE {
                    self.send_data(0x00);
                }
            }
        }
        Ok(())
    }
}

// Keeps the bitmap layout in step with the core trait
const _: () = assert!(PAGES * LINES_PER_PAGE * BYTES_PER_LINE == BITMAP_LEN);

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Records every byte shifted out
    struct RecordingBus {
        bytes: Vec<u8, 8192>,
    }

    impl SerialTx for RecordingBus {
        fn transmit(&mut self, byte: u8) {
            let _ = self.bytes.push(byte);
        }
    }

    /// Records every delay in microseconds
    struct RecordingDelay {
        waits_us: Vec<u32, 4096>,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            let _ = self.waits_us.push(ns / 1000);
        }

        fn delay_us(&mut self, us: u32) {
            let _ = self.waits_us.push(us);
        }

        fn delay_ms(&mut self, ms: u32) {
            let _ = self.waits_us.push(ms * 1000);
        }
    }

    fn lcd() -> St7920<RecordingBus, RecordingDelay> {
        St7920::new(
            RecordingBus { bytes: Vec::new() },
            RecordingDelay {
                waits_us: Vec::new(),
            },
        )
    }

    fn instr(byte: u8) -> [u8; 3] {
        [0xF8, byte & 0xF0, byte << 4]
    }

    fn data(byte: u8) -> [u8; 3] {
        [0xFA, byte & 0xF0, byte << 4]
    }

    #[test]
    fn test_instruction_framing() {
        let mut lcd = lcd();
        lcd.send_instruction(0x91);

        let (bus, delay) = lcd.release();
        assert_eq!(&bus.bytes[..], &[0xF8, 0x90, 0x10]);
        assert_eq!(&delay.waits_us[..], &[72]);
    }

    #[test]
    fn test_clear_settles_longer() {
        let mut lcd = lcd();
        lcd.send_instruction(0x01);
        lcd.send_data(0x01);

        let (_, delay) = lcd.release();
        assert_eq!(&delay.waits_us[..], &[1600, 72]);
    }

    #[test]
    fn test_init_sequence() {
        let mut lcd = lcd();
        lcd.init();

        let (bus, delay) = lcd.release();
        let mut expected: Vec<u8, 32> = Vec::new();
        for b in [0x30, 0x30, 0x0C, 0x01, 0x06] {
            expected.extend_from_slice(&instr(b)).unwrap();
        }
        assert_eq!(&bus.bytes[..], &expected[..]);
        assert_eq!(
            &delay.waits_us[..],
            &[40_000, 72, 100, 72, 37, 72, 100, 1600, 10_000, 72]
        );
    }

    #[test]
    fn test_text_on_odd_column_is_padded() {
        let mut lcd = lcd();
        lcd.write_str_left(1, 3, "AB").unwrap();

        let (bus, _) = lcd.release();
        let mut expected: Vec<u8, 32> = Vec::new();
        expected.extend_from_slice(&instr(0x91)).unwrap();
        expected.extend_from_slice(&data(b' ')).unwrap();
        expected.extend_from_slice(&data(b'A')).unwrap();
        expected.extend_from_slice(&data(b'B')).unwrap();
        assert_eq!(&bus.bytes[..], &expected[..]);
    }

    #[test]
    fn test_row_addresses() {
        for (row, base) in [(0u8, 0x80u8), (1, 0x90), (2, 0x88), (3, 0x98)] {
            let mut lcd = lcd();
            lcd.write_char(row, 4, b'x').unwrap();
            let (bus, _) = lcd.release();
            assert_eq!(&bus.bytes[..3], &instr(base | 2));
        }
    }

    #[test]
    fn test_right_alignment_ends_at_column() {
        let mut lcd = lcd();
        lcd.write_str_right(3, 15, "v1.0").unwrap();

        // "v1.0" ends on 15, so it starts on 12 with no pad
        let (bus, _) = lcd.release();
        assert_eq!(&bus.bytes[..3], &instr(0x98 | 6));
        assert_eq!(&bus.bytes[3..6], &data(b'v'));
    }

    #[test]
    fn test_right_alignment_odd_start_is_padded() {
        let mut lcd = lcd();
        lcd.write_str_right(3, 14, "ml/min").unwrap();

        // six characters ending on 14 start on 9
        let (bus, _) = lcd.release();
        let mut expected: Vec<u8, 32> = Vec::new();
        expected.extend_from_slice(&instr(0x98 | 4)).unwrap();
        expected.extend_from_slice(&data(b' ')).unwrap();
        for &b in b"ml/min" {
            expected.extend_from_slice(&data(b)).unwrap();
        }
        assert_eq!(&bus.bytes[..], &expected[..]);
    }

    #[test]
    fn test_right_alignment_underflow() {
        let mut lcd = lcd();
        assert_eq!(
            lcd.write_str_right(0, 1, "abc"),
            Err(DisplayError::ColumnOutOfRange(1))
        );
        let (bus, _) = lcd.release();
        assert!(bus.bytes.is_empty());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut lcd = lcd();
        assert_eq!(
            lcd.write_char(4, 0, b'x'),
            Err(DisplayError::RowOutOfRange(4))
        );
        assert_eq!(
            lcd.write_char(0, 16, b'x'),
            Err(DisplayError::ColumnOutOfRange(16))
        );
    }

    #[test]
    fn test_mode_checks() {
        let mut lcd = lcd();
        assert_eq!(
            lcd.write_gdram(0, 0, &[0xFF]),
            Err(DisplayError::GraphicsModeRequired)
        );

        lcd.set_graphics_mode();
        assert!(lcd.mode().graphics_ready());
        assert_eq!(
            lcd.write_str_left(0, 0, "x"),
            Err(DisplayError::TextModeRequired)
        );

        lcd.set_text_mode();
        assert_eq!(lcd.mode(), DisplayMode::Basic);
        assert!(lcd.write_str_left(0, 0, "x").is_ok());
    }

    #[test]
    fn test_graphics_mode_sends_extended_then_graphics() {
        let mut lcd = lcd();
        lcd.set_graphics_mode();
        let (bus, _) = lcd.release();
        let mut expected: Vec<u8, 8> = Vec::new();
        expected.extend_from_slice(&instr(0x34)).unwrap();
        expected.extend_from_slice(&instr(0x36)).unwrap();
        assert_eq!(&bus.bytes[..], &expected[..]);
    }

    #[test]
    fn test_standby_leaves_graphics_off() {
        let mut lcd = lcd();
        lcd.standby();
        assert_eq!(lcd.mode(), DisplayMode::Extended { graphics_on: false });
        let (bus, delay) = lcd.release();
        assert_eq!(&bus.bytes[3..6], &instr(0x01));
        assert_eq!(&delay.waits_us[..], &[72, 1600]);
    }

    #[test]
    fn test_gdram_addressing() {
        let mut lcd = lcd();
        lcd.mode = DisplayMode::Extended { graphics_on: true };
        lcd.write_gdram(15, 0x0B, &[0x00, 0x01, 0x80]).unwrap();

        let (bus, _) = lcd.release();
        assert_eq!(&bus.bytes[..3], &instr(0x8F));
        assert_eq!(&bus.bytes[3..6], &instr(0x8B));
        assert_eq!(&bus.bytes[6..9], &data(0x00));
        assert_eq!(&bus.bytes[12..15], &data(0x80));
    }

    /// Extract the data bytes sent for GDRAM line `index` of a full fill
    fn fill_line(bytes: &[u8], index: usize) -> ([u8; 2], [u8; 16]) {
        // per line: two address instructions then 16 data frames
        let stride = (2 + BYTES_PER_LINE) * 3;
        let line = &bytes[index * stride..(index + 1) * stride];
        let addr = [line[1] | (line[2] >> 4), line[4] | (line[5] >> 4)];
        let mut out = [0u8; 16];
        for (k, b) in out.iter_mut().enumerate() {
            let frame = &line[6 + k * 3..9 + k * 3];
            *b = frame[1] | (frame[2] >> 4);
        }
        (addr, out)
    }

    #[test]
    fn test_fill_maps_lower_half_to_second_page() {
        let mut bitmap = [0u8; BITMAP_LEN];
        for (i, b) in bitmap.iter_mut().enumerate() {
            *b = (i / 16) as u8;
        }

        let mut lcd = lcd();
        lcd.mode = DisplayMode::Extended { graphics_on: true };
        lcd.fill_bitmap(&bitmap).unwrap();
        let (bus, _) = lcd.release();

        let (addr, line) = fill_line(&bus.bytes, 5);
        assert_eq!(addr, [0x85, 0x80]);
        assert_eq!(line, [5; 16]);

        // screen line 37 sits on page 2, vertical 5
        let (addr, line) = fill_line(&bus.bytes, 37);
        assert_eq!(addr, [0x85, 0x88]);
        assert_eq!(line, [37; 16]);
    }

    #[test]
    fn test_turned_fill_transposes_columns() {
        // one column-major byte: column 3 of band 0 lights rows 0 and 2
        let mut bitmap = [0u8; BITMAP_LEN];
        bitmap[3] = 0b0000_0101;

        let mut lcd = lcd();
        lcd.mode = DisplayMode::Extended { graphics_on: true };
        lcd.fill_bitmap_turned(&bitmap).unwrap();
        let (bus, _) = lcd.release();

        let (_, row0) = fill_line(&bus.bytes, 0);
        let (_, row1) = fill_line(&bus.bytes, 1);
        let (_, row2) = fill_line(&bus.bytes, 2);
        assert_eq!(row0[0], 0x80 >> 3);
        assert_eq!(row1, [0; 16]);
        assert_eq!(row2[0], 0x80 >> 3);
        assert!(row0[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_clear_bitmap_writes_zeros() {
        let mut lcd = lcd();
        lcd.mode = DisplayMode::Extended { graphics_on: true };
        lcd.clear_bitmap().unwrap();
        let (bus, _) = lcd.release();

        assert_eq!(bus.bytes.len(), 64 * (2 + 16) * 3);
        let (addr, line) = fill_line(&bus.bytes, 63);
        assert_eq!(addr, [0x80 | 31, 0x88]);
        assert_eq!(line, [0; 16]);
    }
}
