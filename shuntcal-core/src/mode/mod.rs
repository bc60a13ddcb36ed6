//! Operating mode
//!
//! The device runs in exactly one of two modes, chosen at boot from the
//! persisted flag byte and fixed until the next boot.

pub mod flag;
pub mod machine;

pub use flag::ModeFlag;
pub use machine::{Mode, ModeEvent};
