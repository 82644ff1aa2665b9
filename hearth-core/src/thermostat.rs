//! Shared thermostat state and the dispatch pass
//!
//! [`Thermostat`] owns the collaborators and the state bundle. Each task
//! kind writes exactly one part of the state:
//!
//! | Task        | Writes       | Reads                          |
//! |-------------|--------------|--------------------------------|
//! | Setpoint    | setpoint     | button latch                   |
//! | Temperature | temperature  | sensor                         |
//! | Heater      | heater       | temperature, setpoint          |
//! | Report      | seconds      | everything                     |
//!
//! Bodies run one at a time in table order, so the Heater task always sees
//! a setpoint or temperature updated earlier in the same pass.

use core::fmt;

use crate::config::ThermostatConfig;
use crate::report::{Diagnostic, ElapsedSeconds, StatusRecord};
use crate::scheduler::{Scheduler, TaskKind};
use crate::state::{ButtonLatch, HeaterState, Setpoint};
use crate::traits::{HeaterOutput, OutputError, SensorError, StatusOutput, TemperatureSensor};

/// Everything the task bodies share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermostatState {
    /// Last successful reading (°C)
    pub temperature: i16,
    pub setpoint: Setpoint,
    pub heater: HeaterState,
    pub seconds: ElapsedSeconds,
}

impl ThermostatState {
    pub fn from_config(config: &ThermostatConfig) -> Self {
        Self {
            temperature: config.initial_temperature,
            setpoint: Setpoint::from_config(&config.setpoint),
            heater: HeaterState::Off,
            seconds: ElapsedSeconds::new(config.seconds_rollover),
        }
    }

    /// Snapshot for the status line
    pub fn record(&self) -> StatusRecord {
        StatusRecord {
            temperature: self.temperature,
            setpoint: self.setpoint.value(),
            heater: self.heater,
            seconds: self.seconds.value(),
        }
    }
}

impl Default for ThermostatState {
    fn default() -> Self {
        Self::from_config(&ThermostatConfig::default())
    }
}

/// Recoverable failure of one task body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskError {
    /// Sensor read failed; previous temperature kept
    Sensor(SensorError),
    /// Status line could not be written
    Output(OutputError),
}

impl From<SensorError> for TaskError {
    fn from(e: SensorError) -> Self {
        TaskError::Sensor(e)
    }
}

impl From<OutputError> for TaskError {
    fn from(e: OutputError) -> Self {
        TaskError::Output(e)
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::Sensor(e) => write!(f, "sensor read failed: {}", e),
            TaskError::Output(e) => write!(f, "status output failed: {}", e),
        }
    }
}

/// Outcome of one dispatch pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchSummary {
    /// Task bodies run
    pub ran: u8,
    /// Bodies that returned an error
    pub failed: u8,
    /// Most recent error in the pass
    pub last_error: Option<TaskError>,
    /// Diagnostic lines the status output refused
    pub dropped_lines: u8,
}

impl DispatchSummary {
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.dropped_lines == 0
    }
}

/// Thermostat controller
///
/// Generic over the collaborators so the same logic runs against real
/// peripherals on the target and against mocks in tests.
pub struct Thermostat<S, H, O> {
    sensor: S,
    heater: H,
    output: O,
    state: ThermostatState,
    /// Diagnostics lost since the last dispatch
    dropped_lines: u8,
}

impl<S, H, O> Thermostat<S, H, O>
where
    S: TemperatureSensor,
    H: HeaterOutput,
    O: StatusOutput,
{
    /// Take ownership of the collaborators and drive the heater off
    pub fn new(sensor: S, mut heater: H, output: O, state: ThermostatState) -> Self {
        heater.set_on(false);
        Self {
            sensor,
            heater,
            output,
            state: ThermostatState {
                heater: HeaterState::Off,
                ..state
            },
            dropped_lines: 0,
        }
    }

    pub fn state(&self) -> &ThermostatState {
        &self.state
    }

    pub fn heater(&self) -> &H {
        &self.heater
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Force the actuator off, e.g. on the way into a fault halt
    pub fn shutdown(&mut self) {
        self.state.heater = HeaterState::Off;
        self.heater.set_on(false);
    }

    /// Write a diagnostic line to the status output
    pub fn emit(&mut self, diagnostic: Diagnostic) -> Result<(), OutputError> {
        self.output.emit(diagnostic)
    }

    fn emit_counted(&mut self, diagnostic: Diagnostic) {
        if self.emit(diagnostic).is_err() {
            self.dropped_lines = self.dropped_lines.saturating_add(1);
        }
    }

    /// Run one task body against the shared state
    pub fn run_task(&mut self, kind: TaskKind, buttons: &ButtonLatch) -> Result<(), TaskError> {
        match kind {
            TaskKind::Setpoint => {
                self.state.setpoint.apply(buttons.take());
                Ok(())
            }
            TaskKind::Temperature => match self.sensor.read_celsius() {
                Ok(celsius) => {
                    self.state.temperature = celsius;
                    Ok(())
                }
                Err(e) => {
                    // The read failure is what gets reported upward
                    self.emit_counted(Diagnostic::SensorReadFailed {
                        status: e.status_code(),
                    });
                    self.emit_counted(Diagnostic::PowerCycleHint);
                    Err(TaskError::Sensor(e))
                }
            },
            TaskKind::Heater => {
                let state = &mut self.state;
                state.heater = state
                    .heater
                    .transition(state.temperature, state.setpoint.value());
                self.heater.set_on(state.heater.is_on());
                Ok(())
            }
            TaskKind::Report => {
                let line = self.state.record().format();
                let written = self.output.write_line(&line);
                self.state.seconds.increment();
                written.map_err(TaskError::Output)
            }
        }
    }

    /// One main-loop pass
    ///
    /// Clears work pending, then runs every triggered task in table order.
    /// A failing body does not stop the ones after it.
    pub fn dispatch(&mut self, scheduler: &Scheduler, buttons: &ButtonLatch) -> DispatchSummary {
        scheduler.take_pending();

        let mut summary = DispatchSummary::default();
        for kind in scheduler.triggered_kinds() {
            summary.ran = summary.ran.saturating_add(1);
            if let Err(e) = self.run_task(kind, buttons) {
                summary.failed = summary.failed.saturating_add(1);
                summary.last_error = Some(e);
            }
        }
        summary.dropped_lines = core::mem::take(&mut self.dropped_lines);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ButtonEvent;
    use std::collections::VecDeque;

    /// Replays queued readings; repeats the last one when drained
    struct MockSensor {
        queue: VecDeque<Result<i16, SensorError>>,
        last: Result<i16, SensorError>,
        reads: usize,
    }

    impl MockSensor {
        fn new(readings: &[Result<i16, SensorError>]) -> Self {
            Self {
                queue: readings.iter().copied().collect(),
                last: Ok(0),
                reads: 0,
            }
        }
    }

    impl TemperatureSensor for MockSensor {
        fn read_celsius(&mut self) -> Result<i16, SensorError> {
            self.reads += 1;
            if let Some(next) = self.queue.pop_front() {
                self.last = next;
            }
            self.last
        }
    }

    #[derive(Default)]
    struct MockHeater {
        on: bool,
        history: Vec<bool>,
    }

    impl HeaterOutput for MockHeater {
        fn set_on(&mut self, on: bool) {
            self.on = on;
            self.history.push(on);
        }

        fn is_on(&self) -> bool {
            self.on
        }
    }

    #[derive(Default)]
    struct RecordingOutput {
        lines: Vec<String>,
        fail: bool,
    }

    impl StatusOutput for RecordingOutput {
        fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
            if self.fail {
                return Err(OutputError::Transport);
            }
            self.lines.push(line.into());
            Ok(())
        }
    }

    fn thermostat(
        readings: &[Result<i16, SensorError>],
    ) -> Thermostat<MockSensor, MockHeater, RecordingOutput> {
        Thermostat::new(
            MockSensor::new(readings),
            MockHeater::default(),
            RecordingOutput::default(),
            ThermostatState::default(),
        )
    }

    /// Tick once and dispatch if work was raised
    fn step(
        t: &mut Thermostat<MockSensor, MockHeater, RecordingOutput>,
        scheduler: &Scheduler,
        buttons: &ButtonLatch,
    ) -> DispatchSummary {
        if scheduler.tick() {
            t.dispatch(scheduler, buttons)
        } else {
            DispatchSummary::default()
        }
    }

    #[test]
    fn test_new_drives_heater_off() {
        let t = thermostat(&[]);
        assert_eq!(t.heater().history, vec![false]);
        assert_eq!(t.state().heater, HeaterState::Off);
        assert_eq!(t.state().temperature, 0);
        assert_eq!(t.state().setpoint.value(), 25);
    }

    #[test]
    fn test_heater_follows_temperature() {
        let scheduler = Scheduler::default();
        let buttons = ButtonLatch::new();
        let mut t = thermostat(&[Ok(20), Ok(26)]);

        // First tick: every task is due
        let summary = step(&mut t, &scheduler, &buttons);
        assert_eq!(summary.ran, 4);
        assert!(summary.is_clean());
        assert_eq!(t.state().heater, HeaterState::On);
        assert!(t.heater().is_on());
        assert_eq!(t.output().lines, vec!["<20,25,1,0000>\n\r"]);

        // One second later the 26 °C reading has switched it off
        for _ in 0..10 {
            step(&mut t, &scheduler, &buttons);
        }
        assert_eq!(t.state().temperature, 26);
        assert_eq!(t.state().heater, HeaterState::Off);
        assert_eq!(t.heater().history, vec![false, true, false]);
        assert_eq!(
            t.output().lines,
            vec!["<20,25,1,0000>\n\r", "<26,25,0,0001>\n\r"]
        );
    }

    #[test]
    fn test_pending_presses_collapse_to_one() {
        let buttons = ButtonLatch::new();
        let mut t = thermostat(&[]);

        for _ in 0..5 {
            buttons.press(ButtonEvent::Increase);
        }
        t.run_task(TaskKind::Setpoint, &buttons).unwrap();
        assert_eq!(t.state().setpoint.value(), 26);

        t.run_task(TaskKind::Setpoint, &buttons).unwrap();
        assert_eq!(t.state().setpoint.value(), 26);
    }

    #[test]
    fn test_last_press_wins() {
        let buttons = ButtonLatch::new();
        let mut t = thermostat(&[]);

        buttons.press(ButtonEvent::Increase);
        buttons.press(ButtonEvent::Decrease);
        t.run_task(TaskKind::Setpoint, &buttons).unwrap();
        assert_eq!(t.state().setpoint.value(), 24);
    }

    #[test]
    fn test_failed_read_keeps_temperature() {
        let buttons = ButtonLatch::new();
        let mut t = thermostat(&[Ok(21), Err(SensorError::Nack)]);

        t.run_task(TaskKind::Temperature, &buttons).unwrap();
        assert_eq!(t.state().temperature, 21);

        let err = t.run_task(TaskKind::Temperature, &buttons).unwrap_err();
        assert_eq!(err, TaskError::Sensor(SensorError::Nack));
        assert_eq!(t.state().temperature, 21);
        assert_eq!(
            t.output().lines,
            vec![
                "Error reading temperature sensor(-5)\n\r",
                "Please power cycle your board by unplugging USB and plugging back in.\n\r",
            ]
        );
    }

    #[test]
    fn test_failure_does_not_stop_pass() {
        let scheduler = Scheduler::default();
        let buttons = ButtonLatch::new();
        let mut t = thermostat(&[Err(SensorError::Timeout)]);

        let summary = step(&mut t, &scheduler, &buttons);
        assert_eq!(summary.ran, 4);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            summary.last_error,
            Some(TaskError::Sensor(SensorError::Timeout))
        );

        // Heater evaluated against the initial 0 °C, report still written
        assert_eq!(t.state().heater, HeaterState::On);
        assert_eq!(t.output().lines.len(), 3);
        assert_eq!(t.output().lines[2], "<00,25,1,0000>\n\r");
    }

    #[test]
    fn test_report_failure_still_counts_seconds() {
        let buttons = ButtonLatch::new();
        let mut t = thermostat(&[]);
        t.output.fail = true;

        let err = t.run_task(TaskKind::Report, &buttons).unwrap_err();
        assert_eq!(err, TaskError::Output(OutputError::Transport));
        assert_eq!(t.state().seconds.value(), 1);
    }

    #[test]
    fn test_dropped_diagnostics_reach_summary() {
        let scheduler = Scheduler::default();
        let buttons = ButtonLatch::new();
        let mut t = thermostat(&[Err(SensorError::Bus), Ok(22)]);
        t.output.fail = true;

        // Both failure lines and the status record are refused
        let summary = step(&mut t, &scheduler, &buttons);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.dropped_lines, 2);
        assert_eq!(
            summary.last_error,
            Some(TaskError::Output(OutputError::Transport))
        );
        assert!(!summary.is_clean());

        // Counter is per pass
        t.output.fail = false;
        for _ in 0..5 {
            let summary = step(&mut t, &scheduler, &buttons);
            assert_eq!(summary.dropped_lines, 0);
        }
        assert_eq!(t.state().temperature, 22);
    }

    #[test]
    fn test_heater_sees_setpoint_from_same_pass() {
        let scheduler = Scheduler::default();
        let buttons = ButtonLatch::new();
        let mut t = thermostat(&[Ok(25)]);

        buttons.press(ButtonEvent::Increase);
        step(&mut t, &scheduler, &buttons);

        assert_eq!(t.state().setpoint.value(), 26);
        assert_eq!(t.state().heater, HeaterState::On);
        assert_eq!(t.output().lines, vec!["<25,26,1,0000>\n\r"]);
    }

    #[test]
    fn test_dispatch_clears_pending_and_runs_nothing_twice() {
        let scheduler = Scheduler::default();
        let buttons = ButtonLatch::new();
        let mut t = thermostat(&[Ok(22)]);

        assert!(scheduler.tick());
        assert!(scheduler.is_pending());
        assert_eq!(t.dispatch(&scheduler, &buttons).ran, 4);
        assert!(!scheduler.is_pending());

        // Spurious wake with nothing triggered
        assert_eq!(t.dispatch(&scheduler, &buttons), DispatchSummary::default());
        assert_eq!(t.sensor.reads, 1);
    }

    #[test]
    fn test_cadence_over_ten_seconds() {
        let scheduler = Scheduler::default();
        let buttons = ButtonLatch::new();
        let mut t = thermostat(&[Ok(18)]);

        for _ in 0..100 {
            step(&mut t, &scheduler, &buttons);
        }
        assert_eq!(t.sensor.reads, 20);
        assert_eq!(t.state().seconds.value(), 10);
        assert_eq!(t.output().lines.last().map(String::as_str), Some("<18,25,1,0009>\n\r"));
    }

    #[test]
    fn test_shutdown_forces_off() {
        let buttons = ButtonLatch::new();
        let mut t = thermostat(&[Ok(10)]);
        t.run_task(TaskKind::Temperature, &buttons).unwrap();
        t.run_task(TaskKind::Heater, &buttons).unwrap();
        assert!(t.heater().is_on());

        t.shutdown();
        assert!(!t.heater().is_on());
        assert_eq!(t.state().heater, HeaterState::Off);
    }
}
