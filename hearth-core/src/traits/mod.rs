//! Hardware abstraction traits
//!
//! These traits define the interface between the thermostat logic and the
//! sensor, actuator and status-output implementations.

pub mod heater;
pub mod output;
pub mod sensor;

pub use heater::HeaterOutput;
pub use output::{OutputError, StatusOutput};
pub use sensor::{SensorError, TemperatureSensor};
