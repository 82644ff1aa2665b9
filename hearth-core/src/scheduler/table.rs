//! Task table and tick accounting
//!
//! Tick context calls [`Scheduler::tick`]; the main context waits for work
//! pending, clears it with [`Scheduler::take_pending`] and drains the
//! triggered entries in table order. Every field is atomic, so both contexts
//! share the scheduler by `&` reference.

use portable_atomic::{AtomicBool, Ordering};

use super::task::{TaskEntry, TaskKind, TASK_COUNT};
use crate::config::{TaskPeriods, ThermostatConfig};

/// Fixed-size, fixed-period cooperative scheduler
#[derive(Debug)]
pub struct Scheduler {
    tasks: [TaskEntry; TASK_COUNT],
    tick_period_ms: u32,
    pending: AtomicBool,
}

impl Scheduler {
    /// Build the task table
    ///
    /// Every task is due on the first tick, then once per period.
    pub const fn new(tick_period_ms: u32, periods: &TaskPeriods) -> Self {
        Self {
            tasks: [
                TaskEntry::new(TaskKind::Setpoint, periods.setpoint_ms, tick_period_ms),
                TaskEntry::new(TaskKind::Temperature, periods.temperature_ms, tick_period_ms),
                TaskEntry::new(TaskKind::Heater, periods.heater_ms, tick_period_ms),
                TaskEntry::new(TaskKind::Report, periods.report_ms, tick_period_ms),
            ],
            tick_period_ms,
            pending: AtomicBool::new(false),
        }
    }

    /// Build the task table from a validated configuration
    pub fn from_config(config: &ThermostatConfig) -> Self {
        Self::new(config.tick_period_ms, &config.periods)
    }

    /// Tick period in milliseconds
    pub fn tick_period_ms(&self) -> u32 {
        self.tick_period_ms
    }

    /// Entries in table order
    pub fn tasks(&self) -> &[TaskEntry] {
        &self.tasks
    }

    /// Entry for a given task kind
    pub fn task(&self, kind: TaskKind) -> &TaskEntry {
        &self.tasks[kind.index()]
    }

    /// Advance every entry by one tick period
    ///
    /// Never blocks and never runs task bodies. Returns true when at least
    /// one entry triggered, in which case work pending is raised.
    pub fn tick(&self) -> bool {
        let mut raised = false;
        for task in &self.tasks {
            if task.advance(self.tick_period_ms) {
                raised = true;
            }
        }

        if raised {
            self.pending.store(true, Ordering::Release);
        }
        raised
    }

    /// Check the work-pending flag without clearing it
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Atomically read and clear the work-pending flag
    pub fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Atomically read and clear one entry's trigger flag
    ///
    /// The flag is cleared before the body runs, so a trigger raised while
    /// the body executes is kept for the next pass.
    pub fn take_triggered(&self, kind: TaskKind) -> bool {
        self.task(kind).take_triggered()
    }

    /// Drain the triggered entries in table order
    ///
    /// Several triggers of the same entry since the last pass collapse into
    /// one dispatch.
    pub fn triggered_kinds(&self) -> TriggeredKinds<'_> {
        TriggeredKinds {
            scheduler: self,
            next: 0,
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::from_config(&ThermostatConfig::default())
    }
}

/// Iterator returned by [`Scheduler::triggered_kinds`]
///
/// Each entry's flag is checked and cleared only when the iterator reaches
/// it.
pub struct TriggeredKinds<'a> {
    scheduler: &'a Scheduler,
    next: usize,
}

impl Iterator for TriggeredKinds<'_> {
    type Item = TaskKind;

    fn next(&mut self) -> Option<TaskKind> {
        while self.next < TASK_COUNT {
            let entry = &self.scheduler.tasks[self.next];
            self.next += 1;
            if entry.take_triggered() {
                return Some(entry.kind());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn periods(setpoint: u32, temperature: u32, heater: u32, report: u32) -> TaskPeriods {
        TaskPeriods {
            setpoint_ms: setpoint,
            temperature_ms: temperature,
            heater_ms: heater,
            report_ms: report,
        }
    }

    #[test]
    fn test_first_tick_triggers_everything() {
        let sched = Scheduler::default();

        assert!(!sched.is_pending());
        assert!(sched.tick());
        assert!(sched.take_pending());

        let kinds: Vec<TaskKind> = sched.triggered_kinds().collect();
        assert_eq!(kinds, TaskKind::ALL.to_vec());
    }

    #[test]
    fn test_reference_cadence() {
        // 100 ms tick: setpoint 200, temperature 500, heater/report 1000
        let sched = Scheduler::default();
        let mut counts = [0u32; TASK_COUNT];

        for _ in 0..100 {
            sched.tick();
            for kind in sched.triggered_kinds() {
                counts[kind.index()] += 1;
            }
        }

        // 10 seconds of ticks
        assert_eq!(counts, [50, 20, 10, 10]);
    }

    #[test]
    fn test_no_pending_without_trigger() {
        let sched = Scheduler::new(100, &periods(1000, 1000, 1000, 1000));
        assert!(sched.tick());
        sched.take_pending();
        sched.triggered_kinds().for_each(drop);

        for _ in 0..9 {
            assert!(!sched.tick());
            assert!(!sched.is_pending());
        }
        assert!(sched.tick());
        assert!(sched.is_pending());
    }

    #[test]
    fn test_multiple_triggers_collapse() {
        let sched = Scheduler::new(100, &periods(100, 1000, 1000, 1000));

        // Five ticks without servicing: setpoint triggered five times
        for _ in 0..5 {
            sched.tick();
        }

        let kinds: Vec<TaskKind> = sched.triggered_kinds().collect();
        assert_eq!(
            kinds.iter().filter(|k| **k == TaskKind::Setpoint).count(),
            1
        );
        assert_eq!(sched.triggered_kinds().count(), 0);
    }

    #[test]
    fn test_trigger_during_body_is_kept() {
        let sched = Scheduler::new(100, &periods(100, 100, 100, 100));
        sched.tick();
        assert!(sched.take_pending());

        let mut kinds = sched.triggered_kinds();
        assert_eq!(kinds.next(), Some(TaskKind::Setpoint));

        // Tick fires while the setpoint body runs
        sched.tick();

        // Rest of this pass still sees the remaining entries
        assert_eq!(kinds.next(), Some(TaskKind::Temperature));
        assert_eq!(kinds.next(), Some(TaskKind::Heater));
        assert_eq!(kinds.next(), Some(TaskKind::Report));
        assert_eq!(kinds.next(), None);

        // The mid-pass trigger of setpoint survives for the next pass
        assert!(sched.take_pending());
        assert!(sched.take_triggered(TaskKind::Setpoint));
    }

    #[test]
    fn test_heater_before_report_in_shared_pass() {
        let sched = Scheduler::default();
        sched.tick();

        let kinds: Vec<TaskKind> = sched.triggered_kinds().collect();
        let heater = kinds.iter().position(|k| *k == TaskKind::Heater).unwrap();
        let report = kinds.iter().position(|k| *k == TaskKind::Report).unwrap();
        assert!(heater < report);
    }

    proptest! {
        #[test]
        fn prop_one_trigger_every_period(tick in 1u32..500, multiple in 1u32..40, ticks in 1usize..400) {
            let period = tick * multiple;
            let sched = Scheduler::new(tick, &periods(period, period, period, period));
            let entry = sched.task(TaskKind::Temperature);

            let mut trigger_ticks = Vec::new();
            for n in 1..=ticks {
                sched.tick();
                prop_assert!(entry.elapsed_ms() < period);
                if sched.take_triggered(TaskKind::Temperature) {
                    trigger_ticks.push(n);
                }
            }

            // Due on the first tick, then every `multiple` ticks
            let expected: Vec<usize> = (1..=ticks).step_by(multiple as usize).collect();
            prop_assert_eq!(trigger_ticks, expected);
        }
    }
}
