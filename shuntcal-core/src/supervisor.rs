//! Supervisor loop
//!
//! Owns every peripheral the application touches and drives one command
//! cycle at a time:
//!
//! ```text
//! refresh watchdog -> await byte -> assemble line -> interpret -> settle
//! ```
//!
//! An idle cycle waits on the byte receive, so the executor keeps the core
//! asleep between keystrokes. The watchdog keeps being refreshed at a fixed
//! interval during that wait. A brown-out is raced against the whole cycle
//! and wins at any await point, command pauses included.

use core::convert::Infallible;

use embassy_futures::select::{select, Either};
use embedded_hal_async::delay::DelayNs;
use shuntcal_hal::eeprom::Eeprom;
use shuntcal_hal::power::VoltageMonitor;
use shuntcal_hal::uart::{UartRx, UartTx};
use shuntcal_hal::watchdog::Watchdog;
use shuntcal_protocol::{messages, LineAssembler, TransportFault};

use crate::config::SupervisorConfig;
use crate::console::Console;
use crate::interpreter::{dispatch, Context, Response};
use crate::mode::Mode;
use crate::store::{RecordStore, StoreError};

/// Why the supervisor stopped; every variant ends in the halt state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shutdown {
    /// Line error on the console
    TransportFault(TransportFault),
    /// `OFF` command
    PowerOff,
    /// Supply dropped below the safe level
    BrownOut,
}

/// Result of one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cycle {
    /// Byte consumed, line not yet complete
    Pending,
    /// A line was interpreted
    Executed(Response),
    /// The supervisor must stop
    Shutdown(Shutdown),
}

/// What happened during boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootReport {
    /// The store was found uninitialized and erased
    pub erased: bool,
    /// Mode latched for this power cycle
    pub mode: Mode,
}

/// Serial console supervisor owning the UART, store, watchdog and delay
pub struct Supervisor<U, E, W, D> {
    uart: U,
    store: RecordStore<E>,
    watchdog: W,
    delay: D,
    assembler: LineAssembler,
    mode: Mode,
    config: SupervisorConfig,
}

impl<U, E, W, D> Supervisor<U, E, W, D>
where
    U: UartRx + UartTx,
    E: Eeprom,
    W: Watchdog,
    D: DelayNs,
{
    /// Prepare the store and latch the operating mode
    ///
    /// The mode is read once here. Mode changes made by commands are
    /// persisted but only take effect on the next boot.
    pub fn boot(
        uart: U,
        mut store: RecordStore<E>,
        watchdog: W,
        delay: D,
        config: SupervisorConfig,
    ) -> Result<(Self, BootReport), StoreError> {
        let erased = store.initialize()?;
        let mode = store.mode()?;

        let supervisor = Self {
            uart,
            store,
            watchdog,
            delay,
            assembler: LineAssembler::new(),
            mode,
            config,
        };
        Ok((supervisor, BootReport { erased, mode }))
    }

    /// Mode latched at boot
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Release the peripherals
    pub fn into_parts(self) -> (U, RecordStore<E>, W, D) {
        (self.uart, self.store, self.watchdog, self.delay)
    }

    /// Run one cycle without brown-out supervision
    pub async fn cycle(&mut self) -> Cycle {
        self.watchdog.refresh();
        let interval_ms = self.config.watchdog_refresh_ms;
        let rx = match select(
            self.uart.receive(),
            keep_alive(&mut self.watchdog, &mut self.delay, interval_ms),
        )
        .await
        {
            Either::First(rx) => rx,
            Either::Second(never) => match never {},
        };

        match self.assembler.feed(rx) {
            Ok(None) => Cycle::Pending,
            Ok(Some(line)) => self.execute(&line).await,
            Err(fault) => {
                let mut console = Console::new(&mut self.uart);
                console.write(match fault {
                    TransportFault::Parity => messages::PARITY_ERROR,
                    TransportFault::Framing => messages::FRAME_ERROR,
                });
                Cycle::Shutdown(Shutdown::TransportFault(fault))
            }
        }
    }

    async fn execute(&mut self, line: &[u8]) -> Cycle {
        let mut ctx = Context {
            console: Console::new(&mut self.uart),
            store: &mut self.store,
            delay: &mut self.delay,
            config: &self.config,
        };

        match dispatch(self.mode, &mut ctx, line).await {
            Response::PowerOff => Cycle::Shutdown(Shutdown::PowerOff),
            response => Cycle::Executed(response),
        }
    }

    /// Run one cycle, abandoning it if the supply fails first
    pub async fn supervised_cycle<M: VoltageMonitor>(&mut self, monitor: &mut M) -> Cycle {
        let outcome = select(self.cycle(), monitor.wait_for_brownout()).await;
        match outcome {
            Either::First(cycle) => cycle,
            Either::Second(()) => {
                self.brownout().await;
                Cycle::Shutdown(Shutdown::BrownOut)
            }
        }
    }

    /// Cycle until something requires a shutdown
    ///
    /// `on_response` sees every executed line.
    pub async fn run<M, F>(&mut self, monitor: &mut M, mut on_response: F) -> Shutdown
    where
        M: VoltageMonitor,
        F: FnMut(Response),
    {
        loop {
            match self.supervised_cycle(monitor).await {
                Cycle::Pending => {}
                Cycle::Executed(response) => on_response(response),
                Cycle::Shutdown(reason) => return reason,
            }
        }
    }

    /// Orderly shutdown on low supply
    async fn brownout(&mut self) {
        self.assembler.reset();
        Console::new(&mut self.uart).write(messages::BROWNOUT);
        self.delay.delay_ms(self.config.brownout_grace_ms).await;
        self.uart.disable();
    }
}

/// Refresh `watchdog` every `interval_ms` for as long as it is polled
async fn keep_alive<W: Watchdog, D: DelayNs>(
    watchdog: &mut W,
    delay: &mut D,
    interval_ms: u32,
) -> Infallible {
    loop {
        delay.delay_ms(interval_ms).await;
        watchdog.refresh();
    }
}
