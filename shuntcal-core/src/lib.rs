//! Board-agnostic core logic for the shunt calibration firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Persistent record store (layout, CRC-8, verification)
//! - Operating mode state machine and its persisted flag
//! - Factory and customer command interpreters
//! - Supervisor loop (watchdog, idle wait, brown-out shutdown)
//! - Text rendering helpers for the console

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod diagnostics;
pub mod interpreter;
pub mod mode;
pub mod store;
pub mod supervisor;

#[cfg(test)]
mod testing;

pub use config::SupervisorConfig;
pub use interpreter::Response;
pub use mode::Mode;
pub use store::{RecordStatus, RecordStore, StoreError};
pub use supervisor::{BootReport, Cycle, Shutdown, Supervisor};
