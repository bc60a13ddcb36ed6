//! Persisted mode flag encoding

use super::machine::Mode;

/// Flag value of a never-written EEPROM
pub const FLAG_UNINITIALIZED: u8 = 0xFF;

/// Flag value for factory mode
pub const FLAG_FACTORY: u8 = 0x00;

/// Flag value for customer mode
pub const FLAG_CUSTOMER: u8 = 0x01;

/// Decoded flag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeFlag {
    /// Never written; the store must be erased before use
    Uninitialized,
    Factory,
    Customer,
    /// Any other value, e.g. after corruption
    Unknown(u8),
}

impl ModeFlag {
    /// Decode a raw flag byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            FLAG_UNINITIALIZED => ModeFlag::Uninitialized,
            FLAG_FACTORY => ModeFlag::Factory,
            FLAG_CUSTOMER => ModeFlag::Customer,
            other => ModeFlag::Unknown(other),
        }
    }

    /// Operating mode this flag selects
    ///
    /// Only an explicit customer flag unlocks customer mode; everything else
    /// boots into factory mode.
    pub fn mode(self) -> Mode {
        match self {
            ModeFlag::Customer => Mode::Customer,
            _ => Mode::Factory,
        }
    }
}
