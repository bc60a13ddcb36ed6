//! RP2040-specific HAL for the shunt calibration firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `shuntcal-hal` traits:
//!
//! - Console UART with per-byte line status
//! - Calibration EEPROM emulated in the last flash sector
//! - Hardware watchdog
//! - Power-good input and the halt state

#![no_std]

pub mod eeprom;
pub mod power;
pub mod uart;
pub mod watchdog;

pub use eeprom::FlashEeprom;
pub use power::{PowerGoodMonitor, Rp2040Power};
pub use uart::{console_config, ConsoleError, Rp2040Uart};
pub use watchdog::Rp2040Watchdog;
