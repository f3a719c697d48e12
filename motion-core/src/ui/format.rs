//! One-decimal numeric fields

use core::fmt::Write;
use heapless::String;

/// Longest formatted field, sign and decimal point included
pub const FIELD_CAPACITY: usize = 16;

/// Largest magnitude rendered as a number; beyond it the field saturates
const LIMIT: f32 = 999_999_999.0;

/// Placeholder for values with no numeric rendering
const NOT_A_NUMBER: &str = "-.-";

/// A value rendered with exactly one digit after the decimal point
///
/// Every rendering contains a decimal point followed by one character, so
/// the characters before the point number `len() - 2`. Fields are placed by
/// their full length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    text: String<FIELD_CAPACITY>,
}

impl Decimal {
    /// Render `value` as `%.1f`
    ///
    /// NaN and infinities render as `-.-`. Finite values beyond ±999999999
    /// saturate at that bound.
    pub fn new(value: f32) -> Self {
        let mut text = String::new();
        if value.is_nan() || value.is_infinite() {
            // Fits the capacity, cannot fail
            let _ = text.push_str(NOT_A_NUMBER);
        } else {
            let value = value.clamp(-LIMIT, LIMIT);
            // At most 13 characters after clamping
            let _ = write!(text, "{:.1}", value);
        }
        Self { text }
    }

    /// Rendered text
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Characters before the decimal point, sign included
    pub fn integer_digits(&self) -> usize {
        self.text.len().saturating_sub(2)
    }
}
