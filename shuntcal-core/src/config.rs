//! Runtime configuration for the supervisor and interpreters

/// Timing and repetition settings
///
/// Defaults match the deployed boards. The firmware overrides them from
/// its build-time device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SupervisorConfig {
    /// Pause after every command before the next line is read (ms)
    pub command_delay_ms: u32,
    /// Number of read-and-verify passes performed by `INIT`
    pub burn_in_passes: u8,
    /// Pause between `INIT` passes (ms)
    pub burn_in_interval_ms: u32,
    /// Time the brown-out announcement gets to drain before the UART is cut (ms)
    pub brownout_grace_ms: u32,
    /// Watchdog refresh interval while waiting for input (ms)
    pub watchdog_refresh_ms: u32,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            command_delay_ms: 500,
            burn_in_passes: 4,
            burn_in_interval_ms: 500,
            brownout_grace_ms: 500,
            watchdog_refresh_ms: 1000,
        }
    }
}
