//! Factory mode: record provisioning and burn-in

use embedded_hal_async::delay::DelayNs;
use shuntcal_hal::eeprom::Eeprom;
use shuntcal_hal::uart::UartTx;
use shuntcal_protocol::{messages, FactoryCommand};

use super::report::{change_mode, dump_record, report_record, storage_fault, unmatched};
use super::{Context, Response};
use crate::mode::{Mode, ModeEvent};
use crate::store::RecordStatus;

/// Execute one factory command
///
/// `line` is the raw command line; it becomes the record for
/// [`FactoryCommand::WriteRecord`].
pub async fn execute<T, E, D>(
    ctx: &mut Context<'_, T, E, D>,
    command: FactoryCommand,
    line: &[u8],
) -> Response
where
    T: UartTx,
    E: Eeprom,
    D: DelayNs,
{
    match command {
        FactoryCommand::Init => burn_in(ctx).await,
        FactoryCommand::Mode => {
            ctx.console.write(messages::FACTORY_MODE);
            Response::ModeAnnounced(Mode::Factory)
        }
        FactoryCommand::Final => {
            change_mode(ctx, Mode::Factory, ModeEvent::Final, messages::FINAL_NOTICE)
        }
        FactoryCommand::Log => dump_record(ctx),
        FactoryCommand::WriteRecord => {
            ctx.console.write_line(line);
            match ctx.store.write_record(line) {
                Ok(checksum) => Response::RecordWritten { checksum },
                Err(e) => storage_fault(ctx, e),
            }
        }
        FactoryCommand::Unknown(kind) => unmatched(ctx, kind),
    }
}

/// Repeat the record report, pausing between passes
async fn burn_in<T, E, D>(ctx: &mut Context<'_, T, E, D>) -> Response
where
    T: UartTx,
    E: Eeprom,
    D: DelayNs,
{
    let passes = ctx.config.burn_in_passes;
    let mut failures = 0;

    for pass in 0..passes {
        if pass > 0 {
            ctx.delay.delay_ms(ctx.config.burn_in_interval_ms).await;
        }
        match report_record(ctx) {
            Ok(RecordStatus::Valid) => {}
            Ok(_) => failures += 1,
            Err(e) => return storage_fault(ctx, e),
        }
    }

    Response::BurnIn { passes, failures }
}
