//! Board-agnostic core logic for the thermostat firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (sensor, heater output, status sink)
//! - Fixed task-table scheduler
//! - Setpoint and heater state machines
//! - Status record and diagnostic formatting
//! - Configuration types and parser
//! - The dispatch pass tying it together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod fault;
pub mod report;
pub mod scheduler;
pub mod state;
pub mod thermostat;
pub mod traits;

pub use thermostat::{DispatchSummary, TaskError, Thermostat, ThermostatState};
