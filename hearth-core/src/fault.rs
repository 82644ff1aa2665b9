//! Unrecoverable fault kinds
//!
//! A fault stops all forward progress. The firmware logs it, forces the
//! heater off and parks; nothing here attempts recovery.

use core::fmt;

/// Bring-up failure that leaves the thermostat unable to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Tick source could not be started
    TickSource,
    /// Sensor or status transport failed to initialize
    Transport,
    /// Heater actuator failed to initialize
    Actuator,
    /// A background task could not be started with its configuration
    Config,
}

impl FaultKind {
    pub const fn name(self) -> &'static str {
        match self {
            FaultKind::TickSource => "tick source",
            FaultKind::Transport => "transport",
            FaultKind::Actuator => "actuator",
            FaultKind::Config => "config",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fault", self.name())
    }
}
