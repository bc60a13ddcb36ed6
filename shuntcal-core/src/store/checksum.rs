//! Record checksum
//!
//! CRC-8 with polynomial 0x1D (x^8 + x^4 + x^3 + x^2 + 1), processed MSB
//! first, initial value 0xFF, no reflection and no final XOR. Every record
//! ever written by a shipped board carries this checksum, so it must never
//! change: a different CRC would make all stored records fail verification.

use crc::{Algorithm, Crc};

/// Parameters of the record CRC
pub const RECORD_CRC_ALGORITHM: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x1d,
    init: 0xff,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xb4,
    residue: 0x00,
};

const RECORD_CRC: Crc<u8> = Crc::<u8>::new(&RECORD_CRC_ALGORITHM);

/// Compute the record checksum over `bytes`
pub fn compute_checksum(bytes: &[u8]) -> u8 {
    RECORD_CRC.checksum(bytes)
}
