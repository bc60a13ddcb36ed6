//! Hardware watchdog

use embassy_rp::watchdog::Watchdog as HwWatchdog;
use embassy_time::Duration;
use shuntcal_hal::watchdog::Watchdog;

/// RP2040 watchdog, started on construction
pub struct Rp2040Watchdog {
    inner: HwWatchdog,
}

impl Rp2040Watchdog {
    /// Start the watchdog with the given timeout
    ///
    /// The RP2040 counter saturates a little above 8 seconds.
    pub fn start(mut inner: HwWatchdog, timeout_ms: u32) -> Self {
        inner.start(Duration::from_millis(u64::from(timeout_ms)));
        Self { inner }
    }

    /// Stop the counter before entering a terminal halt
    pub fn disarm(&mut self) {
        self.inner.stop();
    }
}

impl Watchdog for Rp2040Watchdog {
    fn refresh(&mut self) {
        self.inner.feed();
    }
}
