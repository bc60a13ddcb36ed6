//! Numeric rendering for console output
//!
//! The console does not pull in `core::fmt`; numbers are rendered into
//! small fixed buffers instead.

/// Upper-case hex digits
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Longest decimal rendering of a `u16`
const MAX_DECIMAL_DIGITS: usize = 5;

/// Decimal rendering of a `u16`, most significant digit first
#[derive(Debug, Clone, Copy)]
pub struct Decimal {
    digits: [u8; MAX_DECIMAL_DIGITS],
    start: usize,
}

impl Decimal {
    /// Render `value` without leading zeros
    pub fn new(mut value: u16) -> Self {
        let mut digits = [b'0'; MAX_DECIMAL_DIGITS];
        let mut start = MAX_DECIMAL_DIGITS;
        // Fill from the least significant end so the slice reads MSB-first
        loop {
            start -= 1;
            digits[start] = b'0' + (value % 10) as u8;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        Self { digits, start }
    }

    /// The ASCII digits
    pub fn as_bytes(&self) -> &[u8] {
        &self.digits[self.start..]
    }
}

/// Two upper-case hex digits for `byte`
pub fn hex_byte(byte: u8) -> [u8; 2] {
    [
        HEX_DIGITS[(byte >> 4) as usize],
        HEX_DIGITS[(byte & 0x0F) as usize],
    ]
}
