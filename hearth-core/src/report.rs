//! Status record and diagnostic line formatting
//!
//! Every line carries its own `\n\r` terminator, the order the serial
//! console expects.

use core::fmt::Write;

use heapless::String;

use crate::config::{SecondsRollover, SECONDS_FIELD_MAX};
use crate::state::HeaterState;

/// Capacity of a formatted status record
pub const STATUS_LINE_CAPACITY: usize = 64;

/// Capacity of a formatted diagnostic line
pub const DIAGNOSTIC_LINE_CAPACITY: usize = 96;

/// Line terminator
pub const LINE_END: &str = "\n\r";

/// Snapshot printed by the report task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusRecord {
    pub temperature: i16,
    pub setpoint: i16,
    pub heater: HeaterState,
    pub seconds: u32,
}

impl StatusRecord {
    /// `<TT,SS,H,SSSS>` followed by the line terminator
    pub fn format(&self) -> String<STATUS_LINE_CAPACITY> {
        let mut line = String::new();
        // Widest possible record is well under capacity
        let _ = write!(
            line,
            "<{:02},{:02},{},{:04}>{}",
            self.temperature,
            self.setpoint,
            self.heater.as_digit(),
            self.seconds,
            LINE_END
        );
        line
    }
}

/// Elapsed-seconds counter shown in the status record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElapsedSeconds {
    value: u32,
    rollover: SecondsRollover,
}

impl ElapsedSeconds {
    pub const fn new(rollover: SecondsRollover) -> Self {
        Self { value: 0, rollover }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn rollover(&self) -> SecondsRollover {
        self.rollover
    }

    /// Count one report period
    pub fn increment(&mut self) {
        self.value = match self.rollover {
            SecondsRollover::Wrap if self.value >= SECONDS_FIELD_MAX => 0,
            SecondsRollover::Wrap => self.value + 1,
            SecondsRollover::Saturate => (self.value + 1).min(SECONDS_FIELD_MAX),
            SecondsRollover::Widen => self.value.wrapping_add(1),
        };
    }
}

impl Default for ElapsedSeconds {
    fn default() -> Self {
        Self::new(SecondsRollover::default())
    }
}

/// Human-readable diagnostic emitted on the status output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Diagnostic {
    /// A sensor read failed with the given transport status
    SensorReadFailed { status: i16 },
    /// Operator hint following a failed read
    PowerCycleHint,
    /// Start of the bus bring-up line (no terminator)
    BusInitStarted,
    /// Completes [`Diagnostic::BusInitStarted`]
    BusInitResult { passed: bool },
    /// Start of a detection probe line (no terminator)
    Probe { id: &'static str },
    /// Completes [`Diagnostic::Probe`]
    ProbeResult { found: bool },
    /// Sensor chosen by detection
    Detected { id: &'static str, address: u8 },
    /// No candidate answered
    SensorNotFound,
}

impl Diagnostic {
    pub fn format(&self) -> String<DIAGNOSTIC_LINE_CAPACITY> {
        let mut line = String::new();
        let _ = match self {
            Diagnostic::SensorReadFailed { status } => {
                write!(line, "Error reading temperature sensor({}){}", status, LINE_END)
            }
            Diagnostic::PowerCycleHint => write!(
                line,
                "Please power cycle your board by unplugging USB and plugging back in.{}",
                LINE_END
            ),
            Diagnostic::BusInitStarted => line.write_str("Initializing I2C Driver - "),
            Diagnostic::BusInitResult { passed } => write!(
                line,
                "{}{}",
                if *passed { "Passed" } else { "Failed" },
                LINE_END
            ),
            Diagnostic::Probe { id } => write!(line, "Is this {}? ", id),
            Diagnostic::ProbeResult { found } => {
                write!(line, "{}{}", if *found { "Found" } else { "No" }, LINE_END)
            }
            Diagnostic::Detected { id, address } => {
                write!(line, "Detected TMP{} I2C address: {:x}{}", id, address, LINE_END)
            }
            Diagnostic::SensorNotFound => {
                write!(line, "Temperature sensor not found{}", LINE_END)
            }
        };
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(temperature: i16, setpoint: i16, heater: HeaterState, seconds: u32) -> StatusRecord {
        StatusRecord {
            temperature,
            setpoint,
            heater,
            seconds,
        }
    }

    #[test]
    fn test_status_record_layout() {
        assert_eq!(
            record(20, 25, HeaterState::On, 7).format().as_str(),
            "<20,25,1,0007>\n\r"
        );
        assert_eq!(
            record(5, 0, HeaterState::Off, 0).format().as_str(),
            "<05,00,0,0000>\n\r"
        );
    }

    #[test]
    fn test_status_record_negative_and_wide() {
        assert_eq!(
            record(-1, 99, HeaterState::On, 10_000).format().as_str(),
            "<-1,99,1,10000>\n\r"
        );
        assert_eq!(
            record(i16::MIN, i16::MIN, HeaterState::On, u32::MAX)
                .format()
                .as_str(),
            "<-32768,-32768,1,4294967295>\n\r"
        );
    }

    #[test]
    fn test_seconds_wrap() {
        let mut seconds = ElapsedSeconds::new(SecondsRollover::Wrap);
        for _ in 0..SECONDS_FIELD_MAX {
            seconds.increment();
        }
        assert_eq!(seconds.value(), 9999);

        seconds.increment();
        assert_eq!(seconds.value(), 0);
        seconds.increment();
        assert_eq!(seconds.value(), 1);
    }

    #[test]
    fn test_seconds_saturate() {
        let mut seconds = ElapsedSeconds::new(SecondsRollover::Saturate);
        for _ in 0..SECONDS_FIELD_MAX + 5 {
            seconds.increment();
        }
        assert_eq!(seconds.value(), 9999);
    }

    #[test]
    fn test_seconds_widen() {
        let mut seconds = ElapsedSeconds::new(SecondsRollover::Widen);
        for _ in 0..SECONDS_FIELD_MAX + 2 {
            seconds.increment();
        }
        assert_eq!(seconds.value(), 10_001);

        let line = record(0, 0, HeaterState::Off, seconds.value()).format();
        assert_eq!(line.as_str(), "<00,00,0,10001>\n\r");
    }

    #[test]
    fn test_default_rollover_is_wrap() {
        assert_eq!(ElapsedSeconds::default().rollover(), SecondsRollover::Wrap);
        assert_eq!(ElapsedSeconds::default().value(), 0);
    }

    #[test]
    fn test_read_failure_diagnostics() {
        assert_eq!(
            Diagnostic::SensorReadFailed { status: -5 }.format().as_str(),
            "Error reading temperature sensor(-5)\n\r"
        );
        assert_eq!(
            Diagnostic::PowerCycleHint.format().as_str(),
            "Please power cycle your board by unplugging USB and plugging back in.\n\r"
        );
    }

    #[test]
    fn test_detection_transcript() {
        let mut transcript: std::string::String = [
            Diagnostic::BusInitStarted,
            Diagnostic::BusInitResult { passed: true },
            Diagnostic::Probe { id: "11X" },
            Diagnostic::ProbeResult { found: false },
            Diagnostic::Probe { id: "116" },
            Diagnostic::ProbeResult { found: true },
            Diagnostic::Detected {
                id: "116",
                address: 0x49,
            },
        ]
        .iter()
        .map(|d| d.format())
        .fold(std::string::String::new(), |mut acc, l| {
            acc.push_str(&l);
            acc
        });

        assert_eq!(
            transcript,
            "Initializing I2C Driver - Passed\n\r\
             Is this 11X? No\n\r\
             Is this 116? Found\n\r\
             Detected TMP116 I2C address: 49\n\r"
        );

        transcript.clear();
        transcript.push_str(&Diagnostic::SensorNotFound.format());
        transcript.push_str(&Diagnostic::BusInitResult { passed: false }.format());
        assert_eq!(transcript, "Temperature sensor not found\n\rFailed\n\r");
    }
}
