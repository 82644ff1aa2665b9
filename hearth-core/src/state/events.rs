//! Button events and the latch shared with the button interrupt context

use portable_atomic::{AtomicU8, Ordering};

/// Discrete button-press event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ButtonEvent {
    /// Nothing pending
    #[default]
    None = 0,
    /// Raise the setpoint by one degree
    Increase = 1,
    /// Lower the setpoint by one degree
    Decrease = 2,
}

impl ButtonEvent {
    /// Decode the latch representation; unknown values read as `None`
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => ButtonEvent::Increase,
            2 => ButtonEvent::Decrease,
            _ => ButtonEvent::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ButtonEvent::None)
    }
}

/// Single-slot pending button event
///
/// Written by the button context and consumed by the setpoint task. At most
/// one event is pending; a press arriving before consumption replaces the
/// previous one (last writer wins, no queueing).
#[derive(Debug)]
pub struct ButtonLatch {
    pending: AtomicU8,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            pending: AtomicU8::new(ButtonEvent::None as u8),
        }
    }

    /// Record a press, overwriting any unconsumed one
    pub fn press(&self, event: ButtonEvent) {
        self.pending.store(event as u8, Ordering::Release);
    }

    /// Consume the pending event, leaving `None` behind
    pub fn take(&self) -> ButtonEvent {
        ButtonEvent::from_raw(self.pending.swap(ButtonEvent::None as u8, Ordering::AcqRel))
    }

    /// Read the pending event without consuming it
    pub fn peek(&self) -> ButtonEvent {
        ButtonEvent::from_raw(self.pending.load(Ordering::Acquire))
    }
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}
