//! Mode transitions

use super::flag::{FLAG_CUSTOMER, FLAG_FACTORY};

/// Operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Calibration: the record may be written
    Factory,
    /// Shipped: the record may only be read and verified
    Customer,
}

/// Events that change the persisted mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    /// Factory `FINAL` command
    Final,
    /// Customer `RESET` command
    Reset,
}

impl Mode {
    /// Flag byte that persists this mode
    pub fn flag_byte(self) -> u8 {
        match self {
            Mode::Factory => FLAG_FACTORY,
            Mode::Customer => FLAG_CUSTOMER,
        }
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: ModeEvent) -> Self {
        use Mode::*;
        use ModeEvent::*;

        match (self, event) {
            (Factory, Final) => Customer,
            (Customer, Reset) => Factory,

            // Default: stay in current mode
            _ => self,
        }
    }
}
