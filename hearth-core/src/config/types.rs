//! Configuration type definitions

use core::fmt;

use hearth_hal::{I2cConfig, UartConfig};

use crate::scheduler::TaskKind;

/// Reference tick period (ms)
pub const DEFAULT_TICK_PERIOD_MS: u32 = 100;

/// Largest value that fits the fixed seconds field
pub const SECONDS_FIELD_MAX: u32 = 9999;

/// Per-task periods (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskPeriods {
    /// Button/setpoint task
    pub setpoint_ms: u32,
    /// Sensor read task
    pub temperature_ms: u32,
    /// Heater evaluation task
    pub heater_ms: u32,
    /// Status report task
    pub report_ms: u32,
}

impl Default for TaskPeriods {
    fn default() -> Self {
        Self {
            setpoint_ms: 200,
            temperature_ms: 500,
            heater_ms: 1000,
            report_ms: 1000,
        }
    }
}

impl TaskPeriods {
    /// Period configured for a task
    pub fn period_for(&self, kind: TaskKind) -> u32 {
        match kind {
            TaskKind::Setpoint => self.setpoint_ms,
            TaskKind::Temperature => self.temperature_ms,
            TaskKind::Heater => self.heater_ms,
            TaskKind::Report => self.report_ms,
        }
    }
}

/// Setpoint bounds and start value (°C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetpointConfig {
    pub initial: i16,
    pub min: i16,
    pub max: i16,
}

impl Default for SetpointConfig {
    fn default() -> Self {
        Self {
            initial: 25,
            min: 0,
            max: 99,
        }
    }
}

/// What the elapsed-seconds counter does past the 4-digit field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SecondsRollover {
    /// 9999 is followed by 0000
    #[default]
    Wrap,
    /// Stay at 9999
    Saturate,
    /// Keep counting; the field grows past four digits
    Widen,
}

impl SecondsRollover {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "wrap" => Some(SecondsRollover::Wrap),
            "saturate" => Some(SecondsRollover::Saturate),
            "widen" => Some(SecondsRollover::Widen),
            _ => None,
        }
    }
}

/// Complete thermostat configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermostatConfig {
    /// Tick source period (ms)
    pub tick_period_ms: u32,
    /// Task periods
    pub periods: TaskPeriods,
    /// Setpoint bounds
    pub setpoint: SetpointConfig,
    /// Temperature reported before the first successful read (°C)
    pub initial_temperature: i16,
    /// Seconds counter rollover policy
    pub seconds_rollover: SecondsRollover,
    /// Status output UART
    pub uart: UartConfig,
    /// Sensor bus
    pub i2c: I2cConfig,
    /// Heater actuator is active-low
    pub heater_active_low: bool,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            periods: TaskPeriods::default(),
            setpoint: SetpointConfig::default(),
            initial_temperature: 0,
            seconds_rollover: SecondsRollover::default(),
            uart: UartConfig::default(),
            i2c: I2cConfig::default(),
            heater_active_low: false,
        }
    }
}

/// Invalid configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick period is zero
    ZeroTick,
    /// A task period is shorter than the tick
    PeriodShorterThanTick(TaskKind),
    /// Setpoint minimum above maximum
    InvertedSetpointBounds,
    /// Initial setpoint outside its bounds
    SetpointOutOfBounds,
    /// UART baud rate is zero
    ZeroBaudRate,
    /// I2C frequency is zero
    ZeroI2cFrequency,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTick => f.write_str("tick period must be non-zero"),
            ConfigError::PeriodShorterThanTick(kind) => {
                write!(f, "{} period is shorter than the tick", kind.name())
            }
            ConfigError::InvertedSetpointBounds => f.write_str("setpoint min is above max"),
            ConfigError::SetpointOutOfBounds => {
                f.write_str("initial setpoint is outside [min, max]")
            }
            ConfigError::ZeroBaudRate => f.write_str("uart baud rate must be non-zero"),
            ConfigError::ZeroI2cFrequency => f.write_str("i2c frequency must be non-zero"),
        }
    }
}

impl ThermostatConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        for kind in TaskKind::ALL {
            if self.periods.period_for(kind) < self.tick_period_ms {
                return Err(ConfigError::PeriodShorterThanTick(kind));
            }
        }

        let sp = &self.setpoint;
        if sp.min > sp.max {
            return Err(ConfigError::InvertedSetpointBounds);
        }
        if sp.initial < sp.min || sp.initial > sp.max {
            return Err(ConfigError::SetpointOutOfBounds);
        }

        if self.uart.baudrate == 0 {
            return Err(ConfigError::ZeroBaudRate);
        }
        if self.i2c.frequency == 0 {
            return Err(ConfigError::ZeroI2cFrequency);
        }

        Ok(())
    }
}
