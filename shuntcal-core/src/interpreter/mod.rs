//! Command interpreters
//!
//! One interpreter per operating mode. The supervisor picks one at boot
//! from the persisted flag and routes every completed line to it. Each
//! interpreter matches the line against its keyword table, performs the
//! side effects and reports what happened as a [`Response`].

pub mod customer;
pub mod factory;
mod report;

use embedded_hal_async::delay::DelayNs;
use shuntcal_hal::eeprom::Eeprom;
use shuntcal_hal::uart::UartTx;
use shuntcal_protocol::{command_text, CustomerCommand, FactoryCommand, Unmatched};

use crate::config::SupervisorConfig;
use crate::console::Console;
use crate::mode::Mode;
use crate::store::{RecordStatus, RecordStore, StoreError};

/// Outcome of one executed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Record printed with its integrity verdict
    Info(RecordStatus),
    /// `INIT` completed its read-and-verify passes
    BurnIn { passes: u8, failures: u8 },
    /// Current mode announced
    ModeAnnounced(Mode),
    /// Persisted mode changed; takes effect on the next boot
    ModeChanged(Mode),
    /// Stored bytes dumped
    Log { bytes: usize },
    /// Line stored as the new record
    RecordWritten { checksum: u8 },
    /// Operator asked for power-down
    PowerOff,
    /// No keyword matched
    Unmatched(Unmatched),
    /// The record store failed
    StorageFault(StoreError),
}

/// Everything a command may touch
pub struct Context<'a, T, E, D> {
    pub console: Console<'a, T>,
    pub store: &'a mut RecordStore<E>,
    pub delay: &'a mut D,
    pub config: &'a SupervisorConfig,
}

impl<'a, T, E, D> Context<'a, T, E, D>
where
    T: UartTx,
    E: Eeprom,
    D: DelayNs,
{
    /// Post-command pause
    pub async fn settle(&mut self) {
        self.delay.delay_ms(self.config.command_delay_ms).await;
    }
}

/// Run `line` through the interpreter for `mode`
pub async fn dispatch<T, E, D>(mode: Mode, ctx: &mut Context<'_, T, E, D>, line: &[u8]) -> Response
where
    T: UartTx,
    E: Eeprom,
    D: DelayNs,
{
    let line = command_text(line);
    let response = match mode {
        Mode::Factory => factory::execute(ctx, FactoryCommand::parse(line), line).await,
        Mode::Customer => customer::execute(ctx, CustomerCommand::parse(line)),
    };
    ctx.settle().await;
    response
}
