//! Serial console task
//!
//! Drives the supervisor until it reports a shutdown, then halts.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Delay;

use shuntcal_core::{RecordStatus, Response, Shutdown, Supervisor};
use shuntcal_hal::power::Power;
use shuntcal_hal_rp2040::{FlashEeprom, PowerGoodMonitor, Rp2040Power, Rp2040Uart, Rp2040Watchdog};

pub type ConsoleSupervisor = Supervisor<Rp2040Uart, FlashEeprom, Rp2040Watchdog, Delay>;

/// Console task - one command cycle at a time, supervised for brown-out
#[embassy_executor::task]
pub async fn console_task(
    mut supervisor: ConsoleSupervisor,
    mut monitor: PowerGoodMonitor<Input<'static>>,
) {
    info!("Console task started in {:?} mode", supervisor.mode());

    let reason = supervisor.run(&mut monitor, log_response).await;

    match reason {
        Shutdown::TransportFault(fault) => error!("Console line error: {:?}", fault),
        Shutdown::PowerOff => info!("Power off requested"),
        Shutdown::BrownOut => warn!("Brown-out, console disabled"),
    }

    // Halting is terminal: only a hardware reset may bring the device back
    let (_, _, mut watchdog, _) = supervisor.into_parts();
    watchdog.disarm();
    Rp2040Power.halt()
}

fn log_response(response: Response) {
    match response {
        Response::Info(RecordStatus::Valid) => info!("Record reported, CRC OK"),
        Response::Info(status) => warn!("Record reported: {:?}", status),
        Response::BurnIn { passes, failures } => {
            if failures == 0 {
                info!("Burn-in passed ({} passes)", passes);
            } else {
                warn!("Burn-in: {} of {} passes failed", failures, passes);
            }
        }
        Response::ModeAnnounced(mode) => debug!("Mode announced: {:?}", mode),
        Response::ModeChanged(mode) => info!("Mode set to {:?}, effective after reboot", mode),
        Response::Log { bytes } => debug!("Dumped {} record bytes", bytes),
        Response::RecordWritten { checksum } => info!("Record written, CRC {=u8:#x}", checksum),
        Response::PowerOff => {}
        Response::Unmatched(kind) => warn!("Unmatched line: {:?}", kind),
        Response::StorageFault(e) => error!("Storage fault: {:?}", e),
    }
}
