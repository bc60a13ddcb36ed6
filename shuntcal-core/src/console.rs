//! Console output on top of a UART transmitter

use shuntcal_hal::uart::UartTx;

use crate::diagnostics::{hex_byte, Decimal};

/// Text writer borrowing the console transmitter
///
/// Transmission is best-effort: a failing transmitter has nowhere to
/// report to, so write errors are dropped.
pub struct Console<'a, T> {
    tx: &'a mut T,
}

impl<'a, T: UartTx> Console<'a, T> {
    /// Wrap a transmitter
    pub fn new(tx: &'a mut T) -> Self {
        Self { tx }
    }

    /// Send raw bytes
    pub fn write(&mut self, data: &[u8]) {
        self.tx.write_blocking(data).ok();
    }

    /// Send a line: `data` followed by `\n`
    pub fn write_line(&mut self, data: &[u8]) {
        self.write(data);
        self.write(b"\n");
    }

    /// Send a number in decimal
    pub fn write_decimal(&mut self, value: u16) {
        self.write(Decimal::new(value).as_bytes());
    }

    /// Send a byte as two upper-case hex digits
    pub fn write_hex(&mut self, byte: u8) {
        self.write(&hex_byte(byte));
    }
}
