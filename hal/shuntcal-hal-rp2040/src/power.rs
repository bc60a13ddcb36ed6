//! Power supervision and the halt state

use core::future::Future;

use embedded_hal_async::digital::Wait;
use shuntcal_hal::power::{Power, VoltageMonitor};

/// Brown-out detection from an active-high power-good input
///
/// The supply supervisor drives the pin low while the voltage is below
/// its threshold. The wait is level triggered, so a brown-out that is
/// already present resolves immediately.
pub struct PowerGoodMonitor<P> {
    pin: P,
}

impl<P: Wait> PowerGoodMonitor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: Wait> VoltageMonitor for PowerGoodMonitor<P> {
    fn wait_for_brownout(&mut self) -> impl Future<Output = ()> {
        async move {
            // A pin error leaves nothing to watch; treat it as a supply loss
            self.pin.wait_for_low().await.ok();
        }
    }
}

/// Halt with interrupts masked; only a reset restarts the device
pub struct Rp2040Power;

impl Power for Rp2040Power {
    fn halt(&mut self) -> ! {
        cortex_m::interrupt::disable();
        loop {
            cortex_m::asm::wfi();
        }
    }
}
