//! Calibration EEPROM in on-chip flash
//!
//! The RP2040 has no EEPROM. The record lives in the last 4 KiB sector of
//! the 2 MiB boot flash, shadowed in RAM by [`NorFlashEeprom`].

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use shuntcal_hal::eeprom::{EepromError, NorFlashEeprom};

/// Size of the boot flash
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Emulated EEPROM size
pub const EEPROM_SIZE: usize = 256;

/// Offset of the sector holding the EEPROM image
pub const EEPROM_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// Flash-backed calibration EEPROM
pub type FlashEeprom = NorFlashEeprom<Flash<'static, FLASH, Blocking, FLASH_SIZE>, EEPROM_SIZE>;

/// Open the EEPROM image in the reserved sector
pub fn open(flash: Peri<'static, FLASH>) -> Result<FlashEeprom, EepromError> {
    NorFlashEeprom::new(Flash::new_blocking(flash), EEPROM_OFFSET)
}
