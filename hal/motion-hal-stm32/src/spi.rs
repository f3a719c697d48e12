//! SPI transmit link for STM32F3
//!
//! The LCD only listens, so the bus is driven in blocking, transmit-only
//! fashion. Each transfer is a few bytes; waiting on DMA would cost more
//! than the transfer itself.

use embassy_stm32::gpio::Output;
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::{self, Error as SpiError, Spi};
use embassy_stm32::time::Hertz;
use motion_hal::spi::{Phase, Polarity, SpiConfig};

/// Error from SPI operations
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiBusError {
    /// Mode fault (NSS driven low in master mode)
    ModeFault,
    /// Overrun
    Overrun,
    /// Frame format error
    Framing,
    /// Other error
    Other,
}

impl From<SpiError> for SpiBusError {
    fn from(e: SpiError) -> Self {
        match e {
            SpiError::ModeFault => SpiBusError::ModeFault,
            SpiError::Overrun => SpiBusError::Overrun,
            SpiError::Framing => SpiBusError::Framing,
            _ => SpiBusError::Other,
        }
    }
}

/// Convert a board-agnostic bus description to an embassy SPI config
pub fn to_embassy_config(config: &SpiConfig) -> spi::Config {
    let mut out = spi::Config::default();
    out.frequency = Hertz(config.frequency);
    out.mode = spi::Mode {
        polarity: match config.polarity {
            Polarity::IdleLow => spi::Polarity::IdleLow,
            Polarity::IdleHigh => spi::Polarity::IdleHigh,
        },
        phase: match config.phase {
            Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
            Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
        },
    };
    out
}

/// Blocking SPI transmitter implementing [`motion_hal::SerialTx`]
///
/// The ST7920 chip select is active high and the panel is the only device
/// on the bus, so it is asserted once and held.
pub struct SpiSerialTx<'d> {
    spi: Spi<'d, Blocking>,
    _cs: Output<'d>,
}

impl<'d> SpiSerialTx<'d> {
    /// Wrap a configured transmit-only SPI peripheral and its chip select
    pub fn new(spi: Spi<'d, Blocking>, mut cs: Output<'d>) -> Self {
        cs.set_high();
        Self { spi, _cs: cs }
    }

    fn record(&mut self, result: Result<(), SpiError>) {
        if let Err(e) = result {
            let _e = SpiBusError::from(e);
            #[cfg(feature = "defmt")]
            defmt::warn!("LCD SPI write failed: {}", _e);
        }
    }
}

impl motion_hal::SerialTx for SpiSerialTx<'_> {
    fn transmit(&mut self, byte: u8) {
        let result = self.spi.blocking_write(&[byte]);
        self.record(result);
    }

    fn transmit_all(&mut self, bytes: &[u8]) {
        let result = self.spi.blocking_write(bytes);
        self.record(result);
    }
}
