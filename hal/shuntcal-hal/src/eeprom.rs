//! Byte-addressable persistent storage abstractions
//!
//! Models a small EEPROM: every address holds one byte, reads are cheap and
//! writes are durable across power cycles. Only single-byte writes are
//! atomic; a block write interrupted by power loss may be partially applied.

/// Errors from EEPROM operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EepromError {
    /// Address range extends past the end of the device
    OutOfRange,
    /// Backing storage is not aligned to its erase unit
    Misaligned,
    /// The device reported a failure
    Device,
}

/// EEPROM storage trait
pub trait Eeprom {
    /// Number of addressable bytes
    fn capacity(&self) -> usize;

    /// Read `buf.len()` bytes starting at `addr`
    fn read_bytes(&mut self, addr: u16, buf: &mut [u8]) -> Result<(), EepromError>;

    /// Write `data` starting at `addr`
    fn write_bytes(&mut self, addr: u16, data: &[u8]) -> Result<(), EepromError>;

    /// Read a single byte
    fn read_byte(&mut self, addr: u16) -> Result<u8, EepromError> {
        let mut buf = [0u8; 1];
        self.read_bytes(addr, &mut buf)?;
        Ok(buf[0])
    }

    /// Write a single byte
    fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), EepromError> {
        self.write_bytes(addr, &[value])
    }
}

/// Check that `len` bytes at `addr` fit inside `capacity`
pub fn check_range(capacity: usize, addr: u16, len: usize) -> Result<usize, EepromError> {
    let start = addr as usize;
    match start.checked_add(len) {
        Some(end) if end <= capacity => Ok(start),
        _ => Err(EepromError::OutOfRange),
    }
}

#[cfg(feature = "nor-flash")]
pub use nor::NorFlashEeprom;

#[cfg(feature = "nor-flash")]
mod nor {
    use embedded_storage::nor_flash::{NorFlash, ReadNorFlash};

    use super::{check_range, Eeprom, EepromError};

    /// EEPROM emulated in one erase sector of NOR flash
    ///
    /// The `N` bytes live in a RAM shadow loaded at construction. Every write
    /// updates the shadow, erases the sector and programs the full image
    /// back, so one `write_bytes` costs one erase cycle. Erased flash reads
    /// as `0xFF`, the same as a factory-fresh EEPROM.
    pub struct NorFlashEeprom<F, const N: usize> {
        flash: F,
        offset: u32,
        shadow: [u8; N],
    }

    impl<F: NorFlash, const N: usize> NorFlashEeprom<F, N> {
        /// Load the emulated EEPROM image at `offset` from `flash`
        ///
        /// `offset` must be aligned to the flash erase size and the image
        /// must fit in one erase sector.
        pub fn new(mut flash: F, offset: u32) -> Result<Self, EepromError> {
            if offset as usize % F::ERASE_SIZE != 0
                || N > F::ERASE_SIZE
                || N % F::WRITE_SIZE != 0
            {
                return Err(EepromError::Misaligned);
            }
            if offset as usize + F::ERASE_SIZE > flash.capacity() {
                return Err(EepromError::OutOfRange);
            }

            let mut shadow = [0xFF; N];
            flash
                .read(offset, &mut shadow)
                .map_err(|_| EepromError::Device)?;

            Ok(Self {
                flash,
                offset,
                shadow,
            })
        }

        /// Release the underlying flash
        pub fn into_inner(self) -> F {
            self.flash
        }

        fn commit(&mut self) -> Result<(), EepromError> {
            let sector_end = self.offset + F::ERASE_SIZE as u32;
            self.flash
                .erase(self.offset, sector_end)
                .map_err(|_| EepromError::Device)?;
            self.flash
                .write(self.offset, &self.shadow)
                .map_err(|_| EepromError::Device)
        }
    }

    impl<F: NorFlash, const N: usize> Eeprom for NorFlashEeprom<F, N> {
        fn capacity(&self) -> usize {
            N
        }

        fn read_bytes(&mut self, addr: u16, buf: &mut [u8]) -> Result<(), EepromError> {
            let start = check_range(N, addr, buf.len())?;
            buf.copy_from_slice(&self.shadow[start..start + buf.len()]);
            Ok(())
        }

        fn write_bytes(&mut self, addr: u16, data: &[u8]) -> Result<(), EepromError> {
            let start = check_range(N, addr, data.len())?;
            let target = &mut self.shadow[start..start + data.len()];
            if target == data {
                return Ok(());
            }
            target.copy_from_slice(data);
            self.commit()
        }
    }
}
