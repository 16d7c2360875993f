//! Minimal embassy time driver backed by a system tick counter
//!
//! Stands in until a silicon target supplies a timer peripheral; the
//! counter is advanced from the system timer interrupt.

use embassy_time_driver::{AlarmHandle, Driver};
use portable_atomic::{AtomicU32, Ordering};

pub struct TickTimeDriver {
    tick_count: AtomicU32,
}

impl TickTimeDriver {
    const fn new() -> Self {
        Self {
            tick_count: AtomicU32::new(0),
        }
    }

    /// Advance the driver by one tick (called from the timer interrupt)
    #[allow(dead_code)]
    pub fn tick(&self) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
    }
}

impl Driver for TickTimeDriver {
    fn now(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed) as u64
    }

    unsafe fn allocate_alarm(&self) -> Option<AlarmHandle> {
        // alarms come with the real timer peripheral
        None
    }

    fn set_alarm_callback(&self, _alarm: AlarmHandle, _callback: fn(*mut ()), _ctx: *mut ()) {}

    fn set_alarm(&self, _alarm: AlarmHandle, _timestamp: u64) -> bool {
        false
    }
}

embassy_time_driver::time_driver_impl!(static DRIVER: TickTimeDriver = TickTimeDriver::new());

// Single-core placeholder until the target's interrupt masking is wired in
critical_section::set_impl!(SingleCoreCriticalSection);

struct SingleCoreCriticalSection;

unsafe impl critical_section::Impl for SingleCoreCriticalSection {
    unsafe fn acquire() -> u8 {
        0
    }

    unsafe fn release(_was_active: u8) {}
}
