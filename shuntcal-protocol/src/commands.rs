//! Command keyword tables
//!
//! Each operating mode has its own flat table, matched exactly and in
//! order. Lines that match nothing are sorted into one of two coarse error
//! classes by length alone.

/// Length of a record line in factory mode
///
/// Any factory line of exactly this many bytes that is not a keyword is
/// written as the calibration record. The command is implicit in the
/// length, so a mistyped record of the wrong length is a "length error"
/// rather than a bad write.
pub const RECORD_LINE_LEN: usize = 56;

/// Unmatched lines shorter than this are reported as invalid commands
pub const SHORT_LINE_LIMIT: usize = 6;

/// The part of a line that takes part in matching
///
/// A NUL byte ends the command text; anything after it is ignored. This
/// also keeps NUL out of a written record, where it is the terminator.
pub fn command_text(line: &[u8]) -> &[u8] {
    match line.iter().position(|&b| b == 0) {
        Some(end) => &line[..end],
        None => line,
    }
}

/// Classification of a line that matched no keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unmatched {
    /// Short line: probably a mistyped keyword
    InvalidCommand,
    /// Long line: probably a record of the wrong length
    LengthError,
}

impl Unmatched {
    /// Classify an unmatched line by its length
    pub fn classify(line: &[u8]) -> Self {
        if line.len() < SHORT_LINE_LIMIT {
            Unmatched::InvalidCommand
        } else {
            Unmatched::LengthError
        }
    }
}

/// Commands accepted in customer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CustomerCommand {
    /// Print the record, its checksum and the integrity verdict
    Info,
    /// Announce the operating mode
    Mode,
    /// Return the device to factory mode
    Reset,
    /// Dump the stored record bytes with their addresses
    Log,
    /// Power down until the next hardware reset
    Off,
    /// Nothing matched
    Unknown(Unmatched),
}

impl CustomerCommand {
    /// Match a line against the customer table
    pub fn parse(line: &[u8]) -> Self {
        let line = command_text(line);
        match line {
            b"info" => CustomerCommand::Info,
            b"MODE" => CustomerCommand::Mode,
            b"RESET" => CustomerCommand::Reset,
            b"LOG" => CustomerCommand::Log,
            b"OFF" => CustomerCommand::Off,
            _ => CustomerCommand::Unknown(Unmatched::classify(line)),
        }
    }
}

/// Commands accepted in factory mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FactoryCommand {
    /// Repeated read-and-verify of the record
    Init,
    /// Announce the operating mode
    Mode,
    /// Switch the device to customer mode
    Final,
    /// Dump the stored record bytes with their addresses
    Log,
    /// Store the line itself as the record
    WriteRecord,
    /// Nothing matched
    Unknown(Unmatched),
}

impl FactoryCommand {
    /// Match a line against the factory table
    pub fn parse(line: &[u8]) -> Self {
        let line = command_text(line);
        match line {
            b"INIT" => FactoryCommand::Init,
            b"MODE" => FactoryCommand::Mode,
            b"FINAL" => FactoryCommand::Final,
            b"LOG" => FactoryCommand::Log,
            _ if line.len() == RECORD_LINE_LEN => FactoryCommand::WriteRecord,
            _ => FactoryCommand::Unknown(Unmatched::classify(line)),
        }
    }
}
