//! UART serial communication abstractions
//!
//! The console is a plain byte stream. Transmission blocks until the
//! hardware accepts every byte; reception is asynchronous so the caller can
//! sleep until a byte arrives and race it against other wake-up sources.

use core::future::Future;

/// Line status flags latched alongside a received byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxFlags {
    /// Parity bit did not match the configured parity
    pub parity: bool,
    /// Stop bit missing (includes line break)
    pub framing: bool,
}

impl RxFlags {
    /// No error condition
    pub const CLEAN: Self = Self {
        parity: false,
        framing: false,
    };

    /// Check if either error flag is set
    pub fn is_error(&self) -> bool {
        self.parity || self.framing
    }
}

/// A received byte together with its line status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxByte {
    pub byte: u8,
    pub flags: RxFlags,
}

impl RxByte {
    /// A byte received without errors
    pub const fn clean(byte: u8) -> Self {
        Self {
            byte,
            flags: RxFlags::CLEAN,
        }
    }
}

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Disable the transmitter, receiver and receive interrupt
    ///
    /// Used on the way into a halt. Writes after this are dropped.
    fn disable(&mut self);
}

/// UART receiver
pub trait UartRx {
    /// Wait for the next byte and its status flags
    ///
    /// The returned future is the console's idle point: the executor sleeps
    /// the core until the receive interrupt fires.
    fn receive(&mut self) -> impl Future<Output = RxByte>;
}

/// UART configuration
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Parity mode
    pub parity: Parity,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            parity: Parity::Odd,
        }
    }
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}
