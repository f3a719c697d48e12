//! Graphic LCD trait for the 128x64 ST7920-class panel
//!
//! The panel has two independent memories: DDRAM for 16x4 half-width
//! characters and GDRAM for a 128x64 bitmap. Each is only reachable from
//! its own instruction set, so callers switch modes explicitly before
//! drawing. Implementations never switch modes on their own.

/// Size of a full-screen bitmap in bytes (128 x 64 / 8)
pub const BITMAP_LEN: usize = 1024;

/// Full-screen monochrome bitmap, 16 bytes per line, 64 lines
pub type Bitmap = [u8; BITMAP_LEN];

/// Number of text rows
pub const TEXT_ROWS: u8 = 4;

/// Number of half-width text columns per row
pub const TEXT_COLUMNS: u8 = 16;

/// Instruction set currently selected on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Basic instruction set (RE=0), text operations allowed
    Basic,
    /// Extended instruction set (RE=1)
    Extended {
        /// Whether the bitmap layer is switched on
        graphics_on: bool,
    },
}

impl DisplayMode {
    /// Check if text (DDRAM) operations are allowed
    pub fn text_ready(&self) -> bool {
        matches!(self, DisplayMode::Basic)
    }

    /// Check if bitmap (GDRAM) operations are allowed
    pub fn graphics_ready(&self) -> bool {
        matches!(self, DisplayMode::Extended { graphics_on: true })
    }
}

/// Errors that can occur when placing content on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// A text operation was issued outside basic mode
    TextModeRequired,
    /// A bitmap operation was issued without graphics enabled
    GraphicsModeRequired,
    /// Text row outside 0..=3
    RowOutOfRange(u8),
    /// Text column outside 0..=15, or right alignment underflowed
    ColumnOutOfRange(u8),
}

/// Trait for the graphic LCD
///
/// Transmission is fire-and-forget: the panel never acknowledges, so the
/// only errors reported are placement and mode errors detected before any
/// byte goes out.
pub trait GraphicDisplay {
    /// Current instruction set
    fn mode(&self) -> DisplayMode;

    /// Switch to the basic instruction set (single write)
    fn set_text_mode(&mut self);

    /// Switch to the extended instruction set with graphics on
    fn set_graphics_mode(&mut self);

    /// Clear DDRAM and return the cursor home
    ///
    /// Forces the basic instruction set first.
    fn clear_text(&mut self);

    /// Return the DDRAM cursor home without clearing
    ///
    /// Forces the basic instruction set first.
    fn return_home(&mut self);

    /// Put the controller into standby
    ///
    /// Leaves the panel in the extended instruction set with graphics off.
    fn standby(&mut self);

    /// Write text starting at `col`
    ///
    /// - `row`: Row number (0-3)
    /// - `col`: Half-width column (0-15)
    fn write_str_left(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Write text so that its last character lands on `col`
    fn write_str_right(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Write one character at `col`
    fn write_char(&mut self, row: u8, col: u8, ch: u8) -> Result<(), DisplayError>;

    /// Write raw bytes to GDRAM at an addressed position
    ///
    /// - `vertical`: Line within the page (0-31)
    /// - `horizontal`: Column pair (0-7), OR'd with `0x08` for the lower page
    ///
    /// Data auto-increments horizontally, two bytes per column pair.
    fn write_gdram(&mut self, vertical: u8, horizontal: u8, data: &[u8]) -> Result<(), DisplayError>;

    /// Copy a full-screen bitmap into GDRAM row by row
    fn fill_bitmap(&mut self, bitmap: &Bitmap) -> Result<(), DisplayError>;

    /// Copy a full-screen bitmap stored in column-major (page) layout
    ///
    /// Each destination byte gathers one bit from eight consecutive source
    /// bytes, the bit selected by the line index within its 8-line band.
    fn fill_bitmap_turned(&mut self, bitmap: &Bitmap) -> Result<(), DisplayError>;

    /// Zero all of GDRAM
    fn clear_bitmap(&mut self) -> Result<(), DisplayError>;
}

/// Upper-page column-pair address holding the vertical divider
const DIVIDER_UPPER: u8 = 0x03;

/// Lower-page column-pair address holding the vertical divider
const DIVIDER_LOWER: u8 = 0x0B;

/// Bit pattern of the vertical divider across columns 0x03/0x04
const DIVIDER_BITS: [u8; 3] = [0x00, 0x01, 0x80];

/// Lower-page bit for GDRAM horizontal addresses
const LOWER_PAGE: u8 = 0x08;

/// Line of the edit underline beneath the setpoint field
const UNDERLINE_LINE: u8 = 29;

/// Helper trait for drawing the fixed chrome of each screen
///
/// Every helper is a fixed choreography of [`GraphicDisplay::write_gdram`]
/// calls and requires graphics mode.
pub trait ShapeExt: GraphicDisplay {
    /// Full-width rule between the upper and lower page
    fn divide_horizontal(&mut self) -> Result<(), DisplayError> {
        for x in 0..8 {
            self.write_gdram(31, x, &[0xFF, 0xFF])?;
            self.write_gdram(0, LOWER_PAGE | x, &[0xFF, 0xFF])?;
        }
        Ok(())
    }

    /// Full-height rule down the middle of the panel
    fn divide_vertical(&mut self) -> Result<(), DisplayError> {
        self.divide_upper_half(0..32)?;
        self.divide_lower_half(0..32)
    }

    /// Four-way split
    fn divide_quadrant(&mut self) -> Result<(), DisplayError> {
        self.divide_upper_half(0..31)?;
        self.divide_lower_half(1..32)?;
        self.divide_horizontal()
    }

    /// Horizontal rule with the vertical rule below it
    fn divide_t(&mut self) -> Result<(), DisplayError> {
        self.divide_lower_half(1..32)?;
        self.divide_horizontal()
    }

    /// Horizontal rule with the vertical rule above it
    fn divide_inverse_t(&mut self) -> Result<(), DisplayError> {
        self.divide_upper_half(0..31)?;
        self.divide_horizontal()
    }

    /// Horizontal rule with a short vertical rule over the value row only
    fn divide_half_inverse_t(&mut self) -> Result<(), DisplayError> {
        self.divide_upper_half(16..31)?;
        self.divide_horizontal()
    }

    #[doc(hidden)]
    fn divide_upper_half(&mut self, lines: core::ops::Range<u8>) -> Result<(), DisplayError> {
        for y in lines {
            self.write_gdram(y, DIVIDER_UPPER, &DIVIDER_BITS)?;
        }
        Ok(())
    }

    #[doc(hidden)]
    fn divide_lower_half(&mut self, lines: core::ops::Range<u8>) -> Result<(), DisplayError> {
        for y in lines {
            self.write_gdram(y, DIVIDER_LOWER, &DIVIDER_BITS)?;
        }
        Ok(())
    }

    /// Inverted band behind the top-left header
    fn highlight_top_left(&mut self) -> Result<(), DisplayError> {
        for y in 0..16 {
            for x in 0..3 {
                self.write_gdram(y, x, &[0xFF, 0xFF])?;
            }
        }
        for y in 0..16 {
            self.write_gdram(y, 0x03, &[0xFF, 0xFE])?;
        }
        Ok(())
    }

    /// Inverted band behind the top-right header
    fn highlight_top_right(&mut self) -> Result<(), DisplayError> {
        for y in 0..16 {
            self.write_gdram(y, 0x04, &[0x7F, 0xFF])?;
        }
        for y in 0..16 {
            for x in 5..8 {
                self.write_gdram(y, x, &[0xFF, 0xFF])?;
            }
        }
        Ok(())
    }

    /// Inverted band behind the lower-page header
    fn highlight_bottom(&mut self) -> Result<(), DisplayError> {
        for y in 0..16 {
            for x in 0..8 {
                self.write_gdram(y, LOWER_PAGE | x, &[0xFF, 0xFF])?;
            }
        }
        Ok(())
    }

    /// Inverted title band of the control selection screen
    fn highlight_title(&mut self) -> Result<(), DisplayError> {
        for y in 0..15 {
            for x in 0..8 {
                self.write_gdram(y, x, &[0xFF, 0xFF])?;
            }
        }
        Ok(())
    }

    /// Draw or erase the frame around a menu row
    ///
    /// `index` is taken modulo 4; rows 2 and 3 live on the lower page.
    fn highlight_menu_item(&mut self, index: u8, fill: bool) -> Result<(), DisplayError> {
        let mut y = (index & 0x03) * 16;
        let mut page = 0;
        if y >= 32 {
            y -= 32;
            page = LOWER_PAGE;
        }

        let edge = if fill { 0xFF } else { 0x00 };
        for x in 0..8 {
            self.write_gdram(y, page | x, &[edge, edge])?;
            self.write_gdram(y + 15, page | x, &[edge, edge])?;
        }

        let left = if fill { 0x80 } else { 0x00 };
        let right = if fill { 0x01 } else { 0x00 };
        for line in y + 1..y + 15 {
            self.write_gdram(line, page, &[left, 0x00])?;
            self.write_gdram(line, page | 0x07, &[0x00, right])?;
        }
        Ok(())
    }

    /// Show or hide the underline beneath the setpoint field
    fn underline(&mut self, visible: bool) -> Result<(), DisplayError> {
        let bytes = if visible {
            [0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        } else {
            [0x00; 7]
        };
        self.write_gdram(UNDERLINE_LINE, 0x00, &bytes)
    }
}

// Blanket implementation for all GraphicDisplay types
impl<T: GraphicDisplay + ?Sized> ShapeExt for T {}
