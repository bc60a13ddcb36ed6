//! Console UART
//!
//! Wraps an async embassy UART so that every received byte carries its
//! line status, the way the supervisor expects it.

use core::future::{pending, Future};

use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Async, Config, DataBits, Error, Parity as HwParity, StopBits, Uart};
use shuntcal_hal::uart::{Parity, RxByte, RxFlags, UartConfig, UartRx, UartTx};

#[cfg(feature = "defmt")]
use defmt::warn;

/// Console UART on UART1
///
/// Once disabled the peripheral is released: writes fail and `receive`
/// never completes.
pub struct Rp2040Uart {
    uart: Option<Uart<'static, UART1, Async>>,
}

impl Rp2040Uart {
    pub fn new(uart: Uart<'static, UART1, Async>) -> Self {
        Self { uart: Some(uart) }
    }
}

/// Console transmit errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// The console was disabled on the way into a halt
    Disabled,
    /// The peripheral reported an error
    Uart(Error),
}

/// Peripheral configuration for the console: 8 data bits, 1 stop bit
pub fn console_config(config: &UartConfig) -> Config {
    let mut cfg = Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = DataBits::DataBits8;
    cfg.stop_bits = StopBits::STOP1;
    cfg.parity = match config.parity {
        Parity::None => HwParity::ParityNone,
        Parity::Even => HwParity::ParityEven,
        Parity::Odd => HwParity::ParityOdd,
    };
    cfg
}

/// Translate a receive error into line status flags
///
/// Overrun and break carry no usable byte and are not line errors of the
/// frame itself, so they map to `None`.
fn error_flags(error: &Error) -> Option<RxFlags> {
    match error {
        Error::Parity => Some(RxFlags {
            parity: true,
            framing: false,
        }),
        Error::Framing => Some(RxFlags {
            parity: false,
            framing: true,
        }),
        _ => None,
    }
}

impl UartTx for Rp2040Uart {
    type Error = ConsoleError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let uart = self.uart.as_mut().ok_or(ConsoleError::Disabled)?;
        uart.blocking_write(data).map_err(ConsoleError::Uart)
    }

    fn disable(&mut self) {
        if let Some(mut uart) = self.uart.take() {
            uart.blocking_flush().ok();
        }
    }
}

impl UartRx for Rp2040Uart {
    fn receive(&mut self) -> impl Future<Output = RxByte> {
        async move {
            let Some(uart) = self.uart.as_mut() else {
                return pending().await;
            };

            loop {
                let mut buf = [0u8; 1];
                match uart.read(&mut buf).await {
                    Ok(()) => return RxByte::clean(buf[0]),
                    Err(e) => match error_flags(&e) {
                        Some(flags) => {
                            return RxByte {
                                byte: buf[0],
                                flags,
                            }
                        }
                        None => {
                            #[cfg(feature = "defmt")]
                            warn!("UART receive error ignored: {:?}", e);
                        }
                    },
                }
            }
        }
    }
}
