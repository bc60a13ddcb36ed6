//! Shuntcal Hardware Abstraction Layer
//!
//! This crate defines the collaborator traits the board-agnostic core is
//! written against. Chip-specific HALs (currently RP2040) implement them,
//! and host tests implement them with in-memory mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  shuntcal-core (supervisor, store, ...)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  shuntcal-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ shuntcal-hal-   │
//!            │    rp2040       │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial console
//! - [`eeprom::Eeprom`] - Byte-addressable persistent storage
//! - [`power::Power`], [`power::VoltageMonitor`] - Halt and brown-out detection
//! - [`watchdog::Watchdog`] - Hang supervision

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom;
pub mod power;
pub mod uart;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use eeprom::{Eeprom, EepromError};
pub use power::{Power, VoltageMonitor};
pub use uart::{RxByte, RxFlags, UartRx, UartTx};
pub use watchdog::Watchdog;

#[cfg(feature = "nor-flash")]
pub use eeprom::NorFlashEeprom;
