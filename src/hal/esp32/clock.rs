//! Boot-relative millisecond clock for the panel loop.

use crate::traits::Clock;

/// Milliseconds since boot, read from the ESP-IDF high resolution timer.
///
/// `esp_timer_get_time()` counts microseconds from boot in a signed 64-bit
/// value and never wraps in practice. The controller only compares these
/// readings against the status line deadline.
///
/// # Example
///
/// ```ignore
/// use cyd_remote::hal::esp32::Esp32Clock;
/// use cyd_remote::traits::Clock;
///
/// let clock = Esp32Clock;
/// loop {
///     controller.tick(clock.now_ms());
/// }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Esp32Clock;

impl Esp32Clock {
    /// Returns the clock. It holds no state, so any number may exist.
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for Esp32Clock {
    fn now_ms(&self) -> u64 {
        // SAFETY: reads a free-running timer started by ESP-IDF before main
        let micros = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        u64::try_from(micros / 1000).unwrap_or(0)
    }
}
