//! State shared between the tick, button and main contexts
//!
//! Uses embassy-sync primitives for the wake-up and a lock-free latch for
//! the pending button event.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use hearth_core::state::ButtonLatch;

/// Raised by the tick task when at least one task entry triggered
pub static WORK_PENDING: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Most recent unconsumed button press
pub static BUTTONS: ButtonLatch = ButtonLatch::new();
