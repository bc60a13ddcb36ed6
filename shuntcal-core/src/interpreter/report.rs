//! Output routines shared by both interpreters

use shuntcal_hal::eeprom::Eeprom;
use shuntcal_hal::uart::UartTx;
use shuntcal_protocol::messages;
use shuntcal_protocol::Unmatched;

use super::{Context, Response};
use crate::mode::{Mode, ModeEvent};
use crate::store::{RecordStatus, StoreError};

/// Print the record text, its stored checksum and the integrity verdict
///
/// ```text
/// <text> CRC: 5A
/// CRC check: OK
/// ```
pub(crate) fn report_record<T, E, D>(
    ctx: &mut Context<'_, T, E, D>,
) -> Result<RecordStatus, StoreError>
where
    T: UartTx,
    E: Eeprom,
{
    let record = ctx.store.read_record()?;

    ctx.console.write(record.text());
    ctx.console.write(messages::CHECKSUM_LABEL);
    match record.stored_checksum() {
        Some(checksum) => ctx.console.write_hex(checksum),
        None => ctx.console.write(b"--"),
    }
    ctx.console.write(b"\n");

    let status = record.status();
    ctx.console.write(match status {
        RecordStatus::Valid => messages::VERDICT_OK,
        RecordStatus::Corrupt => messages::VERDICT_FAIL,
        RecordStatus::Absent => messages::VERDICT_EMPTY,
    });
    Ok(status)
}

/// Dump each record byte with its EEPROM address
///
/// ```text
/// Current bytes & respective positions:
/// EEPROM[1]; S
/// EEPROM[2]; N
/// ```
pub(crate) fn dump_record<T, E, D>(ctx: &mut Context<'_, T, E, D>) -> Response
where
    T: UartTx,
    E: Eeprom,
{
    ctx.console.write(messages::LOG_HEADER);
    let record = match ctx.store.read_record() {
        Ok(record) => record,
        Err(e) => return storage_fault(ctx, e),
    };

    for (addr, byte) in record.addressed_bytes() {
        ctx.console.write(messages::LOG_ENTRY_OPEN);
        ctx.console.write_decimal(addr);
        ctx.console.write(messages::LOG_ENTRY_SEPARATOR);
        ctx.console.write_line(&[byte]);
    }
    ctx.console.write(b"\n");

    Response::Log {
        bytes: record.len(),
    }
}

/// Persist the mode reached from `current` by `event` and announce it
pub(crate) fn change_mode<T, E, D>(
    ctx: &mut Context<'_, T, E, D>,
    current: Mode,
    event: ModeEvent,
    notice: &[u8],
) -> Response
where
    T: UartTx,
    E: Eeprom,
{
    let next = current.transition(event);
    if let Err(e) = ctx.store.write_mode(next) {
        return storage_fault(ctx, e);
    }
    ctx.console.write(notice);
    Response::ModeChanged(next)
}

/// Report a line that matched no keyword
pub(crate) fn unmatched<T, E, D>(ctx: &mut Context<'_, T, E, D>, kind: Unmatched) -> Response
where
    T: UartTx,
{
    ctx.console.write(match kind {
        Unmatched::InvalidCommand => messages::INVALID_COMMAND,
        Unmatched::LengthError => messages::LENGTH_ERROR,
    });
    Response::Unmatched(kind)
}

/// Report a store failure
pub(crate) fn storage_fault<T, E, D>(ctx: &mut Context<'_, T, E, D>, error: StoreError) -> Response
where
    T: UartTx,
{
    ctx.console.write(messages::STORAGE_ERROR);
    Response::StorageFault(error)
}
