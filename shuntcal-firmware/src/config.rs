//! Device configuration compiled in from device.toml

use shuntcal_core::SupervisorConfig;
use shuntcal_hal::uart::{Parity, UartConfig};

include!(concat!(env!("OUT_DIR"), "/device_config.rs"));

/// Console line settings
pub fn console() -> UartConfig {
    UartConfig {
        baudrate: CONSOLE_BAUDRATE,
        parity: CONSOLE_PARITY,
    }
}

/// Supervisor timing
pub fn supervisor() -> SupervisorConfig {
    SupervisorConfig {
        command_delay_ms: COMMAND_DELAY_MS,
        burn_in_passes: BURN_IN_PASSES,
        burn_in_interval_ms: BURN_IN_INTERVAL_MS,
        brownout_grace_ms: BROWNOUT_GRACE_MS,
        watchdog_refresh_ms: WATCHDOG_REFRESH_MS,
    }
}
