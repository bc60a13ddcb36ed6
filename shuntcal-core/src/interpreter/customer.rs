//! Customer mode: read-only access to the record

use shuntcal_hal::eeprom::Eeprom;
use shuntcal_hal::uart::UartTx;
use shuntcal_protocol::{messages, CustomerCommand};

use super::report::{change_mode, dump_record, report_record, storage_fault, unmatched};
use super::{Context, Response};
use crate::mode::{Mode, ModeEvent};

/// Execute one customer command
pub fn execute<T, E, D>(ctx: &mut Context<'_, T, E, D>, command: CustomerCommand) -> Response
where
    T: UartTx,
    E: Eeprom,
{
    match command {
        CustomerCommand::Info => match report_record(ctx) {
            Ok(status) => Response::Info(status),
            Err(e) => storage_fault(ctx, e),
        },
        CustomerCommand::Mode => {
            ctx.console.write(messages::CUSTOMER_MODE);
            Response::ModeAnnounced(Mode::Customer)
        }
        CustomerCommand::Reset => {
            change_mode(ctx, Mode::Customer, ModeEvent::Reset, messages::RESET_NOTICE)
        }
        CustomerCommand::Log => dump_record(ctx),
        CustomerCommand::Off => {
            ctx.console.write(messages::POWER_OFF);
            Response::PowerOff
        }
        CustomerCommand::Unknown(kind) => unmatched(ctx, kind),
    }
}
