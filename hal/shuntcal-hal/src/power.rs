//! Power management abstractions
//!
//! The console never sleeps explicitly: awaiting the next byte lets the
//! executor put the core to sleep. What the core does need is a way to
//! stop for good and a way to learn that the supply is collapsing.

use core::future::Future;

/// Terminal low-power state
pub trait Power {
    /// Enter the lowest-power halt state
    ///
    /// Does not return. Only a hardware reset (or a watchdog reset, on
    /// parts where the watchdog keeps running) leaves this state.
    fn halt(&mut self) -> !;
}

/// Supply voltage monitor
pub trait VoltageMonitor {
    /// Resolve once the supply drops below the safe operating level
    fn wait_for_brownout(&mut self) -> impl Future<Output = ()>;
}
