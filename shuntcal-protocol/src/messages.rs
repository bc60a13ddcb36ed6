//! Console response texts
//!
//! The wording is what operators and their scripts already expect from
//! deployed boards, trailing spaces included.

/// Reply to `MODE` in customer mode
pub const CUSTOMER_MODE: &[u8] = b"Customer Mode\n";

/// Reply to `MODE` in factory mode
pub const FACTORY_MODE: &[u8] = b"Factory Mode\n";

/// Reply to `RESET`
pub const RESET_NOTICE: &[u8] =
    b"Reset to factory mode. Disconnect and reconnect, then refer to documentation for instructions. \n";

/// Reply to `FINAL`
pub const FINAL_NOTICE: &[u8] =
    b"Entered customer mode. Disconnect and reconnect, then input 'info' for shunt characteristics. \n";

/// Header printed before a `LOG` dump
pub const LOG_HEADER: &[u8] = b"Current bytes & respective positions: \n";

/// Opening of one `LOG` line: `EEPROM[<addr>]; <byte>`
pub const LOG_ENTRY_OPEN: &[u8] = b"EEPROM[";

/// Separator between address and byte in a `LOG` line
pub const LOG_ENTRY_SEPARATOR: &[u8] = b"]; ";

/// Reply to `OFF`, sent before halting
pub const POWER_OFF: &[u8] = b"MCU disabled.\n";

/// Label between the record text and its stored checksum
pub const CHECKSUM_LABEL: &[u8] = b" CRC: ";

/// Integrity verdicts printed after the checksum
pub const VERDICT_OK: &[u8] = b"CRC check: OK\n";
pub const VERDICT_FAIL: &[u8] = b"CRC check: FAIL\n";
pub const VERDICT_EMPTY: &[u8] = b"CRC check: EMPTY\n";

/// Unmatched short line
pub const INVALID_COMMAND: &[u8] = b"Error: Invalid Command\n";

/// Unmatched long line
pub const LENGTH_ERROR: &[u8] = b"Error: Length error\n";

/// The record store could not be read or written
pub const STORAGE_ERROR: &[u8] = b"Error: Storage\n";

/// Reception ended by a parity error
pub const PARITY_ERROR: &[u8] = b"USART Error: Parity\n";

/// Reception ended by a framing error
pub const FRAME_ERROR: &[u8] = b"USART Error: Frame\n";

/// Brown-out announcement, sent before shutting the console down
pub const BROWNOUT: &[u8] =
    b"Shutting down; insufficient voltage detected. Please reconnect with 5V VCC.";
