//! In-memory peripherals for host tests

use core::future::{pending, poll_fn, Future};
use core::task::Poll;

use embassy_futures::yield_now;
use embedded_hal_async::delay::DelayNs;
use heapless::{Deque, Vec};
use shuntcal_hal::eeprom::{check_range, Eeprom, EepromError};
use shuntcal_hal::power::VoltageMonitor;
use shuntcal_hal::uart::{RxByte, RxFlags, UartRx, UartTx};
use shuntcal_hal::watchdog::Watchdog;

use crate::store::MAX_CAPACITY;

/// EEPROM backed by a RAM array
pub struct RamEeprom {
    bytes: [u8; MAX_CAPACITY],
    capacity: usize,
    fail_writes: bool,
}

impl RamEeprom {
    /// A factory-fresh device: every byte reads `0xFF`
    pub fn erased() -> Self {
        Self::with_capacity(MAX_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: [0xFF; MAX_CAPACITY],
            capacity,
            fail_writes: false,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.capacity]
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.capacity]
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl Eeprom for RamEeprom {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn read_bytes(&mut self, addr: u16, buf: &mut [u8]) -> Result<(), EepromError> {
        let start = check_range(self.capacity, addr, buf.len())?;
        buf.copy_from_slice(&self.bytes[start..start + buf.len()]);
        Ok(())
    }

    fn write_bytes(&mut self, addr: u16, data: &[u8]) -> Result<(), EepromError> {
        if self.fail_writes {
            return Err(EepromError::Device);
        }
        let start = check_range(self.capacity, addr, data.len())?;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }
}

/// Scripted UART: bytes are queued up front, output is captured
///
/// Once the input runs dry, `receive` never completes.
pub struct MockUart {
    input: Deque<RxByte, 1024>,
    output: Vec<u8, 8192>,
    disabled: bool,
}

impl MockUart {
    pub fn new() -> Self {
        Self {
            input: Deque::new(),
            output: Vec::new(),
            disabled: false,
        }
    }

    /// Queue error-free bytes
    pub fn push(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.input.push_back(RxByte::clean(byte)).unwrap();
        }
    }

    /// Queue one byte with line errors
    pub fn push_faulty(&mut self, byte: u8, flags: RxFlags) {
        self.input.push_back(RxByte { byte, flags }).unwrap();
    }

    pub fn queued(&self) -> usize {
        self.input.len()
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub fn output_contains(&self, needle: &[u8]) -> bool {
        needle.is_empty() || self.output.windows(needle.len()).any(|w| w == needle)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl UartTx for MockUart {
    type Error = ();

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.disabled {
            return Err(());
        }
        self.output.extend_from_slice(data).map_err(|_| ())
    }

    fn disable(&mut self) {
        self.disabled = true;
    }
}

impl UartRx for MockUart {
    fn receive(&mut self) -> impl Future<Output = RxByte> {
        async move {
            match self.input.pop_front() {
                Some(rx) => rx,
                None => pending().await,
            }
        }
    }
}

/// Watchdog that counts refreshes
#[derive(Default)]
pub struct CountingWatchdog {
    pub refreshes: usize,
}

impl Watchdog for CountingWatchdog {
    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

/// Delay that completes on its second poll and records the requested time
///
/// The single yield lets a looping waiter hand control back to its caller.
///
/// With `stall_on` set, a millisecond delay of exactly that length never
/// completes, which lets tests hold a command in its post-command pause.
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ms: u64,
    pub calls: Vec<u32, 64>,
    pub stall_on: Option<u32>,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ms += u64::from(ns / 1_000_000);
    }

    async fn delay_us(&mut self, us: u32) {
        self.total_ms += u64::from(us / 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        if self.stall_on == Some(ms) {
            pending::<()>().await;
        }
        yield_now().await;
        self.total_ms += u64::from(ms);
        self.calls.push(ms).ok();
    }
}

/// Voltage monitor that reports a brown-out after a number of polls
///
/// The countdown is shared across calls, so a brown-out scheduled for the
/// third poll fires on the third poll overall, whichever wait it lands in.
pub struct ScriptedMonitor {
    polls_left: Option<usize>,
}

impl ScriptedMonitor {
    /// Supply never fails
    pub fn healthy() -> Self {
        Self { polls_left: None }
    }

    /// Supply fails once the monitor has been polled `polls` more times
    pub fn brownout_after(polls: usize) -> Self {
        Self {
            polls_left: Some(polls),
        }
    }
}

impl VoltageMonitor for ScriptedMonitor {
    fn wait_for_brownout(&mut self) -> impl Future<Output = ()> {
        poll_fn(move |cx| match &mut self.polls_left {
            None => Poll::Pending,
            Some(0) => Poll::Ready(()),
            Some(n) => {
                *n -= 1;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        })
    }
}
