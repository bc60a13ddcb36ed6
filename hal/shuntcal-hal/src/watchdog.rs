//! Watchdog timer abstraction

/// Hardware watchdog
///
/// The implementation is expected to be already running. If `refresh` is
/// not called within the configured period the device is reset.
pub trait Watchdog {
    /// Restart the watchdog countdown
    fn refresh(&mut self);
}
