//! Boot splash bitmap
//!
//! Row-major, 16 bytes per line, MSB leftmost. A framed placeholder until
//! the product artwork is converted.

use motion_core::traits::{Bitmap, BITMAP_LEN};

/// Splash shown for the first two seconds after power-up
pub const SPLASH: Bitmap = splash();

const fn splash() -> Bitmap {
    let mut bitmap = [0u8; BITMAP_LEN];
    let mut line = 0;
    while line < 64 {
        let row = line * 16;
        if line == 0 || line == 63 {
            let mut k = 0;
            while k < 16 {
                bitmap[row + k] = 0xFF;
                k += 1;
            }
        } else {
            bitmap[row] = 0x80;
            bitmap[row + 15] = 0x01;
        }
        // solid band through the middle
        if line >= 28 && line < 36 {
            let mut k = 4;
            while k < 12 {
                bitmap[row + k] = 0xFF;
                k += 1;
            }
        }
        line += 1;
    }
    bitmap
}
