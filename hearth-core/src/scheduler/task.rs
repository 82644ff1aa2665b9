//! Task table entries

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// Number of entries in the task table
pub const TASK_COUNT: usize = 4;

/// The closed set of periodic duties
///
/// Declaration order is table order, and table order is dispatch order:
/// `Heater` must stay ahead of `Report` so a report shows the heater state
/// decided in the same pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskKind {
    /// Apply the pending button event to the setpoint
    Setpoint,
    /// Read the temperature sensor
    Temperature,
    /// Evaluate the heater state machine and drive the actuator
    Heater,
    /// Emit the status record and count the second
    Report,
}

impl TaskKind {
    /// All task kinds in table order
    pub const ALL: [TaskKind; TASK_COUNT] = [
        TaskKind::Setpoint,
        TaskKind::Temperature,
        TaskKind::Heater,
        TaskKind::Report,
    ];

    /// Position of this task in the table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short name for logs
    pub const fn name(self) -> &'static str {
        match self {
            TaskKind::Setpoint => "setpoint",
            TaskKind::Temperature => "temperature",
            TaskKind::Heater => "heater",
            TaskKind::Report => "report",
        }
    }
}

/// One schedulable unit with its own period and pending-trigger flag
///
/// `elapsed_ms` is written only from the tick context. `triggered` is set by
/// the tick context and cleared by the main context.
#[derive(Debug)]
pub struct TaskEntry {
    kind: TaskKind,
    period_ms: u32,
    elapsed_ms: AtomicU32,
    triggered: AtomicBool,
}

impl TaskEntry {
    /// Create an entry that becomes due on the first tick
    pub const fn new(kind: TaskKind, period_ms: u32, tick_period_ms: u32) -> Self {
        Self {
            kind,
            period_ms,
            elapsed_ms: AtomicU32::new(period_ms.saturating_sub(tick_period_ms)),
            triggered: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Time accumulated since the last trigger
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms.load(Ordering::Relaxed)
    }

    /// Check the trigger flag without clearing it
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }

    /// Account one tick; returns true if this tick triggered the task
    pub(crate) fn advance(&self, tick_period_ms: u32) -> bool {
        let elapsed = self
            .elapsed_ms
            .load(Ordering::Relaxed)
            .saturating_add(tick_period_ms);

        if elapsed >= self.period_ms {
            self.elapsed_ms.store(0, Ordering::Relaxed);
            self.triggered.store(true, Ordering::Release);
            true
        } else {
            self.elapsed_ms.store(elapsed, Ordering::Relaxed);
            false
        }
    }

    /// Atomically read and clear the trigger flag
    pub(crate) fn take_triggered(&self) -> bool {
        self.triggered.swap(false, Ordering::AcqRel)
    }
}
