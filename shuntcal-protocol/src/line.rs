//! Line assembly for the serial console.
//!
//! Bytes are accumulated until a `\n`:
//! - `\r` is accepted and dropped, so CRLF hosts work unchanged
//! - a byte arriving with a parity or framing flag aborts reception
//! - a byte that does not fit discards the whole partial line, and the
//!   bytes after it start a fresh line

use heapless::Vec;
use shuntcal_hal::uart::RxByte;

/// Line terminator
pub const LINE_TERMINATOR: u8 = b'\n';

/// Carriage return, tolerated before the terminator
pub const CARRIAGE_RETURN: u8 = b'\r';

/// Maximum number of data bytes in one line (terminator excluded)
pub const MAX_LINE_LEN: usize = 56;

/// A complete command line, terminator stripped
pub type CommandLine = Vec<u8, MAX_LINE_LEN>;

/// Line status errors that end reception
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportFault {
    /// Parity mismatch on a received byte
    Parity,
    /// Missing stop bit on a received byte
    Framing,
}

/// Accumulates received bytes into command lines
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl LineAssembler {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Discard any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Number of bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single received byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a line,
    /// `Ok(None)` when more bytes are needed, or `Err` when the byte carries
    /// a line error. Parity is reported in preference to framing.
    pub fn feed(&mut self, rx: RxByte) -> Result<Option<CommandLine>, TransportFault> {
        if rx.flags.is_error() {
            self.reset();
            return Err(if rx.flags.parity {
                TransportFault::Parity
            } else {
                TransportFault::Framing
            });
        }

        match rx.byte {
            LINE_TERMINATOR => Ok(Some(core::mem::take(&mut self.buffer))),
            CARRIAGE_RETURN => Ok(None),
            byte => {
                if self.buffer.push(byte).is_err() {
                    // Overflow: silently drop the partial line
                    self.buffer.clear();
                }
                Ok(None)
            }
        }
    }

    /// Feed multiple error-free bytes
    ///
    /// Returns the first complete line found, if any. Bytes after the
    /// terminator are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<CommandLine> {
        for &byte in bytes {
            // Clean bytes never fault
            if let Ok(Some(line)) = self.feed(RxByte::clean(byte)) {
                return Some(line);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuntcal_hal::uart::RxFlags;

    #[test]
    fn test_simple_line() {
        let mut assembler = LineAssembler::new();
        let line = assembler.feed_bytes(b"info\n").unwrap();
        assert_eq!(&line[..], b"info");
        assert_eq!(assembler.pending(), 0);
    }

    #[test]
    fn test_crlf_tolerated() {
        let mut assembler = LineAssembler::new();
        let line = assembler.feed_bytes(b"MODE\r\n").unwrap();
        assert_eq!(&line[..], b"MODE");
    }

    #[test]
    fn test_carriage_return_does_not_close_line() {
        let mut assembler = LineAssembler::new();
        assert!(assembler.feed_bytes(b"LO\rG").is_none());
        assert_eq!(assembler.pending(), 3);
        let line = assembler.feed_bytes(b"\n").unwrap();
        assert_eq!(&line[..], b"LOG");
    }

    #[test]
    fn test_empty_line() {
        let mut assembler = LineAssembler::new();
        let line = assembler.feed_bytes(b"\n").unwrap();
        assert!(line.is_empty());
    }

    #[test]
    fn test_full_line_fits() {
        let mut assembler = LineAssembler::new();
        let text = [b'x'; MAX_LINE_LEN];
        assert!(assembler.feed_bytes(&text).is_none());
        let line = assembler.feed_bytes(b"\n").unwrap();
        assert_eq!(line.len(), MAX_LINE_LEN);
    }

    #[test]
    fn test_overflow_discards_partial_line() {
        let mut assembler = LineAssembler::new();
        let text = [b'x'; MAX_LINE_LEN];
        assembler.feed_bytes(&text);
        // The 57th byte does not fit: everything so far is dropped, itself included
        assert!(assembler.feed_bytes(b"y").is_none());
        assert_eq!(assembler.pending(), 0);

        let line = assembler.feed_bytes(b"info\n").unwrap();
        assert_eq!(&line[..], b"info");
    }

    #[test]
    fn test_overflow_tail_becomes_new_line() {
        let mut assembler = LineAssembler::new();
        let mut text = [b'a'; MAX_LINE_LEN + 4];
        text[MAX_LINE_LEN + 1..].copy_from_slice(b"LOG");
        assert!(assembler.feed_bytes(&text).is_none());
        let line = assembler.feed_bytes(b"\n").unwrap();
        assert_eq!(&line[..], b"LOG");
    }

    #[test]
    fn test_parity_error() {
        let mut assembler = LineAssembler::new();
        assembler.feed_bytes(b"IN");
        let rx = RxByte {
            byte: b'I',
            flags: RxFlags {
                parity: true,
                framing: true,
            },
        };
        assert_eq!(assembler.feed(rx), Err(TransportFault::Parity));
        assert_eq!(assembler.pending(), 0);
    }

    #[test]
    fn test_framing_error() {
        let mut assembler = LineAssembler::new();
        let rx = RxByte {
            byte: 0,
            flags: RxFlags {
                parity: false,
                framing: true,
            },
        };
        assert_eq!(assembler.feed(rx), Err(TransportFault::Framing));
    }

    #[test]
    fn test_bytes_after_terminator_not_consumed() {
        let mut assembler = LineAssembler::new();
        let line = assembler.feed_bytes(b"MODE\nLOG").unwrap();
        assert_eq!(&line[..], b"MODE");
        assert_eq!(assembler.pending(), 0);
    }
}
