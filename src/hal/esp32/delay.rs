//! FreeRTOS-backed delay.

use crate::traits::DelayMs;
use esp_idf_hal::delay::FreeRtos;

/// Delay that yields to the FreeRTOS scheduler.
///
/// Waits shorter than one scheduler tick still yield for a full tick, which
/// is fine for the LCD's 2 ms settle time.
#[derive(Clone, Copy, Debug, Default)]
pub struct Esp32Delay;

impl Esp32Delay {
    /// Creates a new delay.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl DelayMs for Esp32Delay {
    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }
}
