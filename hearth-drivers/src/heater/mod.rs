//! Heater actuator implementations

pub mod gpio;

pub use gpio::GpioHeater;
