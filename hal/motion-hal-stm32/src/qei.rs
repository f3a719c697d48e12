//! Quadrature encoder counter on an STM32F3 timer
//!
//! The timer counts every edge of both encoder channels in hardware; the
//! control loop only reads the 16-bit counter once per sample period.

use embassy_stm32::timer::qei::Qei;
use embassy_stm32::timer::GeneralInstance4Channel;
use motion_core::traits::TickCounter;

/// Timer-backed [`TickCounter`]
///
/// The hardware counter keeps running while disabled; disabling only pins
/// the reported count, so a stopped motor never reports stale motion.
pub struct QeiCounter<'d, T: GeneralInstance4Channel> {
    qei: Qei<'d, T>,
    /// Raw count taken as zero
    origin: u16,
    enabled: bool,
}

impl<'d, T: GeneralInstance4Channel> QeiCounter<'d, T> {
    /// Wrap an encoder interface, initially disabled
    pub fn new(qei: Qei<'d, T>) -> Self {
        let origin = qei.count();
        Self {
            qei,
            origin,
            enabled: false,
        }
    }
}

impl<T: GeneralInstance4Channel> TickCounter for QeiCounter<'_, T> {
    fn count(&mut self) -> i16 {
        if !self.enabled {
            return 0;
        }
        self.qei.count().wrapping_sub(self.origin) as i16
    }

    fn reset(&mut self) {
        self.origin = self.qei.count();
    }

    fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            self.origin = self.qei.count();
        }
        self.enabled = enabled;
    }
}
