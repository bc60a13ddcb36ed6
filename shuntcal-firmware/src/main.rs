//! Shuntcal - Shunt Calibration Record Firmware
//!
//! Main firmware binary for RP2040-based shunt boards. A single serial
//! console task serves the factory and customer command sets; the
//! calibration record lives in the last flash sector.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{InterruptHandler as UartInterruptHandler, Uart};
use embassy_rp::watchdog::Watchdog;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use shuntcal_core::{RecordStore, StoreError, Supervisor};
use shuntcal_hal::power::Power;
use shuntcal_hal_rp2040::{
    console_config, eeprom, PowerGoodMonitor, Rp2040Power, Rp2040Uart, Rp2040Watchdog,
};

mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART1_IRQ => UartInterruptHandler<UART1>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Shuntcal firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Armed before touching storage so a hung boot still resets
    let watchdog = Rp2040Watchdog::start(Watchdog::new(p.WATCHDOG), config::WATCHDOG_TIMEOUT_MS);

    // Console on UART1 (GPIO8 TX, GPIO9 RX)
    let uart = Uart::new(
        p.UART1,
        p.PIN_8,
        p.PIN_9,
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        console_config(&config::console()),
    );
    info!(
        "Console: {} baud, {:?} parity",
        config::CONSOLE_BAUDRATE,
        config::CONSOLE_PARITY
    );

    // Supply supervisor power-good output, open drain
    let power_good = Input::new(p.PIN_22, Pull::Up);

    let store = match eeprom::open(p.FLASH)
        .map_err(StoreError::from)
        .and_then(RecordStore::new)
    {
        Ok(store) => store,
        Err(e) => {
            // Left unfed, the watchdog restarts the device
            error!("Calibration storage unavailable: {:?}", e);
            Rp2040Power.halt()
        }
    };

    let (supervisor, report) = match Supervisor::boot(
        Rp2040Uart::new(uart),
        store,
        watchdog,
        Delay,
        config::supervisor(),
    ) {
        Ok(booted) => booted,
        Err(e) => {
            error!("Boot failed: {:?}", e);
            Rp2040Power.halt()
        }
    };

    if report.erased {
        warn!("Uninitialized storage erased, factory mode set");
    }
    info!("Booted in {:?} mode", report.mode);

    spawner
        .spawn(tasks::console_task(supervisor, PowerGoodMonitor::new(power_good)))
        .unwrap();
}
