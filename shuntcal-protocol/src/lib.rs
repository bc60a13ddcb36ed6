//! Shuntcal Serial Console Protocol
//!
//! This crate defines the text protocol spoken on the device's serial
//! console. The host sends one command per line; the device answers with
//! free-form human-readable text.
//!
//! # Line Format
//!
//! ```text
//! ┌──────────────────────────┬────────┬──────┐
//! │ COMMAND / RECORD TEXT    │ [\r]   │ \n   │
//! │ 0–56 bytes               │ ignored│ 1B   │
//! └──────────────────────────┴────────┴──────┘
//! ```
//!
//! Keywords are case-sensitive and matched exactly. In factory mode a line
//! of exactly [`RECORD_LINE_LEN`] bytes that is not a keyword is taken as
//! the calibration record to store.

#![no_std]
#![deny(unsafe_code)]

pub mod commands;
pub mod line;
pub mod messages;

pub use commands::{
    command_text, CustomerCommand, FactoryCommand, Unmatched, RECORD_LINE_LEN, SHORT_LINE_LIMIT,
};
pub use line::{CommandLine, LineAssembler, TransportFault, MAX_LINE_LEN};
