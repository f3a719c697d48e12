//! Synchronous serial link abstractions
//!
//! The ST7920 serial interface is write-only: there is no MISO line and
//! no acknowledgment, so a transmit either reaches the panel or is lost.

/// Write-only synchronous serial transmitter
///
/// Implementations block until the byte has been shifted out. Bus errors
/// cannot be observed by the receiver and are not reported to the caller.
pub trait SerialTx {
    /// Shift one byte out, MSB first
    fn transmit(&mut self, byte: u8);

    /// Shift a sequence of bytes out in order
    fn transmit_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.transmit(byte);
        }
    }
}

impl<T: SerialTx + ?Sized> SerialTx for &mut T {
    fn transmit(&mut self, byte: u8) {
        (**self).transmit(byte);
    }

    fn transmit_all(&mut self, bytes: &[u8]) {
        (**self).transmit_all(bytes);
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl SpiConfig {
    /// Settings for the ST7920 serial mode
    ///
    /// The controller samples SID on the rising edge of SCLK with SCLK idling
    /// low, and its serial clock tops out around 1 MHz at 3.3 V.
    pub const ST7920: Self = Self {
        frequency: 1_000_000,
        polarity: Polarity::IdleLow,
        phase: Phase::CaptureOnFirstTransition,
    };
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::ST7920
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}
