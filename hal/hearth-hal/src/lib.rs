//! Hearth Hardware Abstraction Layer
//!
//! This crate defines the transport and actuator traits the thermostat
//! drivers are written against. Chip HALs are bridged in through the
//! [`adapters`] module, which wraps any `embedded-hal` 1.0 or
//! `embedded-io` implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (hearth-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hearth-drivers (sensor, heater, sink)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hearth-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embassy-rp via embedded-hal/-io        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (heater actuator)
//! - [`uart::UartTx`] - Serial transmit (status records)
//! - [`i2c::I2cBus`] - I2C bus operations (temperature sensor)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod gpio;
pub mod i2c;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adapters::{EhI2c, EhOutput, IoUart};
pub use gpio::OutputPin;
pub use i2c::{I2cBus, I2cBusError, I2cConfig};
pub use uart::{UartConfig, UartError, UartTx};
