//! Record store over an injected EEPROM

use heapless::Vec;
use shuntcal_hal::eeprom::{Eeprom, EepromError};

use super::checksum::compute_checksum;
use crate::mode::{Mode, ModeFlag};

/// Address of the mode flag byte
pub const FLAG_ADDR: u16 = 0;

/// Address of the first record text byte
pub const RECORD_ADDR: u16 = 1;

/// Largest EEPROM the store addresses; larger devices are used up to this size
pub const MAX_CAPACITY: usize = 256;

/// Smallest usable EEPROM: flag, terminator, checksum and one text byte
const MIN_CAPACITY: usize = 4;

/// Bytes following the flag, i.e. the most a record read can return
const MAX_REGION: usize = MAX_CAPACITY - 1;

/// Record text as read back from storage
pub type RecordText = Vec<u8, MAX_REGION>;

/// Errors from record store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// EEPROM access failed
    Eeprom(EepromError),
    /// Text plus terminator and checksum does not fit the record region
    RecordTooLong,
    /// EEPROM too small to hold a record
    Capacity,
}

impl From<EepromError> for StoreError {
    fn from(e: EepromError) -> Self {
        StoreError::Eeprom(e)
    }
}

/// Integrity classification of the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordStatus {
    /// First record byte is the terminator
    Absent,
    /// Stored checksum matches the text
    Valid,
    /// Stored checksum is missing or does not match the text
    Corrupt,
}

/// A record read back from storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    text: RecordText,
    stored_checksum: Option<u8>,
}

impl Record {
    /// The record text, terminator excluded
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Length of the record text
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the record is absent
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Checksum byte following the terminator
    ///
    /// `None` when the text runs to the end of the region and no checksum
    /// address remains.
    pub fn stored_checksum(&self) -> Option<u8> {
        self.stored_checksum
    }

    /// Whether the stored checksum matches the text
    pub fn verify(&self) -> bool {
        self.stored_checksum == Some(compute_checksum(&self.text))
    }

    /// Classify the record
    pub fn status(&self) -> RecordStatus {
        if self.text.is_empty() {
            RecordStatus::Absent
        } else if self.verify() {
            RecordStatus::Valid
        } else {
            RecordStatus::Corrupt
        }
    }

    /// Text bytes paired with their EEPROM addresses
    pub fn addressed_bytes(&self) -> impl Iterator<Item = (u16, u8)> + '_ {
        (RECORD_ADDR..).zip(self.text.iter().copied())
    }
}

/// Persistent record store
///
/// All reads and writes of the mode flag and the record go through this
/// type, so the layout invariants live in one place.
pub struct RecordStore<E> {
    eeprom: E,
    capacity: usize,
}

impl<E: Eeprom> RecordStore<E> {
    /// Wrap an EEPROM
    pub fn new(eeprom: E) -> Result<Self, StoreError> {
        let capacity = eeprom.capacity().min(MAX_CAPACITY);
        if capacity < MIN_CAPACITY {
            return Err(StoreError::Capacity);
        }
        Ok(Self { eeprom, capacity })
    }

    /// Addressable bytes in use
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Longest record text that fits
    pub fn max_record_len(&self) -> usize {
        self.capacity - 3
    }

    /// Borrow the underlying EEPROM
    pub fn eeprom(&self) -> &E {
        &self.eeprom
    }

    /// Mutably borrow the underlying EEPROM
    pub fn eeprom_mut(&mut self) -> &mut E {
        &mut self.eeprom
    }

    /// Release the underlying EEPROM
    pub fn into_inner(self) -> E {
        self.eeprom
    }

    /// Erase the store on first boot
    ///
    /// If the flag still holds the uninitialized sentinel, zeroes the whole
    /// record region and sets factory mode. Returns whether erasure ran.
    pub fn initialize(&mut self) -> Result<bool, StoreError> {
        if self.flag()? != ModeFlag::Uninitialized {
            return Ok(false);
        }

        let zeros = [0u8; MAX_REGION];
        self.eeprom
            .write_bytes(RECORD_ADDR, &zeros[..self.capacity - 1])?;
        self.write_mode(Mode::Factory)?;
        Ok(true)
    }

    /// Decode the raw flag byte
    pub fn flag(&mut self) -> Result<ModeFlag, StoreError> {
        Ok(ModeFlag::from_byte(self.eeprom.read_byte(FLAG_ADDR)?))
    }

    /// Operating mode selected by the flag
    pub fn mode(&mut self) -> Result<Mode, StoreError> {
        Ok(self.flag()?.mode())
    }

    /// Persist a new operating mode
    pub fn write_mode(&mut self, mode: Mode) -> Result<(), StoreError> {
        self.eeprom.write_byte(FLAG_ADDR, mode.flag_byte())?;
        Ok(())
    }

    /// Store `text` as the record
    ///
    /// One trailing `\n` is stripped. Text, terminator and checksum are
    /// written as one block. Returns the checksum written.
    pub fn write_record(&mut self, text: &[u8]) -> Result<u8, StoreError> {
        let text = text.strip_suffix(b"\n").unwrap_or(text);
        let len = text.len();
        if len > self.max_record_len() {
            return Err(StoreError::RecordTooLong);
        }

        let checksum = compute_checksum(text);
        let mut image = [0u8; MAX_REGION];
        image[..len].copy_from_slice(text);
        image[len] = 0;
        image[len + 1] = checksum;

        self.eeprom.write_bytes(RECORD_ADDR, &image[..len + 2])?;
        Ok(checksum)
    }

    /// Read the record back
    ///
    /// The text ends at the first terminator, or at the end of the region
    /// if there is none.
    pub fn read_record(&mut self) -> Result<Record, StoreError> {
        let mut region = [0u8; MAX_REGION];
        let region = &mut region[..self.capacity - 1];
        self.eeprom.read_bytes(RECORD_ADDR, region)?;

        let len = region
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(region.len());
        let stored_checksum = region.get(len + 1).copied();

        let mut text = Vec::new();
        // Cannot fail: the region never exceeds the vector capacity
        text.extend_from_slice(&region[..len])
            .map_err(|_| StoreError::RecordTooLong)?;

        Ok(Record {
            text,
            stored_checksum,
        })
    }

    /// Whether the stored checksum matches the stored text
    pub fn verify_record(&mut self) -> Result<bool, StoreError> {
        Ok(self.read_record()?.verify())
    }

    /// Classify the stored record
    pub fn inspect(&mut self) -> Result<RecordStatus, StoreError> {
        Ok(self.read_record()?.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RamEeprom;
    use proptest::prelude::*;

    fn fresh_store() -> RecordStore<RamEeprom> {
        RecordStore::new(RamEeprom::erased()).unwrap()
    }

    #[test]
    fn test_initialize_erases_uninitialized_device() {
        let mut store = fresh_store();
        assert_eq!(store.flag(), Ok(ModeFlag::Uninitialized));

        assert_eq!(store.initialize(), Ok(true));
        assert_eq!(store.flag(), Ok(ModeFlag::Factory));
        assert!(store.eeprom().bytes().iter().all(|&b| b == 0));

        let record = store.read_record().unwrap();
        assert!(record.is_empty());
        assert_eq!(record.status(), RecordStatus::Absent);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut store = fresh_store();
        store.initialize().unwrap();
        store.write_record(b"calibrated").unwrap();

        assert_eq!(store.initialize(), Ok(false));
        assert_eq!(store.read_record().unwrap().text(), b"calibrated");
    }

    #[test]
    fn test_initialize_keeps_customer_mode() {
        let mut store = fresh_store();
        store.initialize().unwrap();
        store.write_mode(Mode::Customer).unwrap();

        assert_eq!(store.initialize(), Ok(false));
        assert_eq!(store.mode(), Ok(Mode::Customer));
    }

    #[test]
    fn test_empty_record_does_not_verify() {
        let mut store = fresh_store();
        store.initialize().unwrap();
        // All-zero region: stored checksum 0x00, CRC of nothing is 0xFF
        assert_eq!(store.verify_record(), Ok(false));
        assert_eq!(store.inspect(), Ok(RecordStatus::Absent));
    }

    #[test]
    fn test_write_layout() {
        let mut store = fresh_store();
        store.initialize().unwrap();
        let checksum = store.write_record(b"AB").unwrap();

        let bytes = store.eeprom().bytes();
        assert_eq!(&bytes[..5], &[0x00, b'A', b'B', 0x00, checksum]);
        assert_eq!(checksum, compute_checksum(b"AB"));
    }

    #[test]
    fn test_trailing_newline_stripped_once() {
        let mut store = fresh_store();
        store.initialize().unwrap();

        store.write_record(b"shunt\n").unwrap();
        assert_eq!(store.read_record().unwrap().text(), b"shunt");

        store.write_record(b"shunt\n\n").unwrap();
        assert_eq!(store.read_record().unwrap().text(), b"shunt\n");
        assert_eq!(store.verify_record(), Ok(true));
    }

    #[test]
    fn test_shorter_write_over_longer_record() {
        let mut store = fresh_store();
        store.initialize().unwrap();
        store.write_record(b"a much longer record").unwrap();
        store.write_record(b"short").unwrap();

        let record = store.read_record().unwrap();
        assert_eq!(record.text(), b"short");
        assert_eq!(record.status(), RecordStatus::Valid);
    }

    #[test]
    fn test_record_too_long() {
        let mut store = RecordStore::new(RamEeprom::with_capacity(16)).unwrap();
        assert_eq!(store.max_record_len(), 13);
        assert!(store.write_record(&[b'x'; 13]).is_ok());
        assert_eq!(
            store.write_record(&[b'x'; 14]),
            Err(StoreError::RecordTooLong)
        );
    }

    #[test]
    fn test_unterminated_region_has_no_checksum() {
        let mut store = RecordStore::new(RamEeprom::with_capacity(8)).unwrap();
        store.eeprom_mut().bytes_mut()[1..].fill(b'z');

        let record = store.read_record().unwrap();
        assert_eq!(record.len(), 7);
        assert_eq!(record.stored_checksum(), None);
        assert_eq!(record.status(), RecordStatus::Corrupt);
    }

    #[test]
    fn test_capacity_too_small() {
        let result = RecordStore::new(RamEeprom::with_capacity(3));
        assert!(matches!(result, Err(StoreError::Capacity)));
    }

    #[test]
    fn test_addressed_bytes_start_after_flag() {
        let mut store = fresh_store();
        store.initialize().unwrap();
        store.write_record(b"xyz").unwrap();

        let record = store.read_record().unwrap();
        let mut entries = record.addressed_bytes();
        assert_eq!(entries.next(), Some((1, b'x')));
        assert_eq!(entries.next(), Some((2, b'y')));
        assert_eq!(entries.next(), Some((3, b'z')));
        assert_eq!(entries.next(), None);
    }

    #[test]
    fn test_eeprom_failure_propagates() {
        let mut store = fresh_store();
        store.eeprom_mut().fail_writes(true);
        assert_eq!(
            store.write_record(b"abc"),
            Err(StoreError::Eeprom(EepromError::Device))
        );
    }

    proptest! {
        #[test]
        fn write_then_read_round_trips(text in proptest::collection::vec(1u8..=255, 1..=56)) {
            let mut store = fresh_store();
            store.initialize().unwrap();
            store.write_record(&text).unwrap();

            let expected = text.strip_suffix(b"\n").unwrap_or(&text);
            let record = store.read_record().unwrap();
            prop_assert_eq!(record.text(), expected);
            prop_assert_eq!(store.verify_record(), Ok(true));
        }

        #[test]
        fn single_byte_corruption_is_detected(
            text in proptest::collection::vec(b' '..=b'~', 1..=56),
            index in any::<prop::sample::Index>(),
            replacement in b' '..=b'~',
        ) {
            let i = index.index(text.len());
            prop_assume!(text[i] != replacement);

            let mut store = fresh_store();
            store.initialize().unwrap();
            store.write_record(&text).unwrap();
            store.eeprom_mut().bytes_mut()[RECORD_ADDR as usize + i] = replacement;

            prop_assert_eq!(store.verify_record(), Ok(false));
            prop_assert_eq!(store.inspect(), Ok(RecordStatus::Corrupt));
        }
    }
}
