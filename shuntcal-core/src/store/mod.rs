//! Persistent record store
//!
//! EEPROM layout:
//!
//! ```text
//! ┌──────┬──────────────────────┬──────┬─────┬──────────────┐
//! │ FLAG │ RECORD TEXT          │ \0   │ CRC │ (unused)     │
//! │ 0    │ 1 ..= len            │      │ 1B  │ .. capacity  │
//! └──────┴──────────────────────┴──────┴─────┴──────────────┘
//! ```
//!
//! The flag byte selects the operating mode (see [`crate::mode`]). The
//! record is a text string with a CRC-8 over its bytes stored right after
//! the terminator.

pub mod checksum;
pub mod record;

pub use checksum::{compute_checksum, RECORD_CRC_ALGORITHM};
pub use record::{
    Record, RecordStatus, RecordStore, RecordText, StoreError, FLAG_ADDR, MAX_CAPACITY,
    RECORD_ADDR,
};
