//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in hearth-core, on top of the hearth-hal transport traits:
//!
//! - Temperature sensor (TI TMP-family over I2C, with board detection)
//! - Heater actuator (GPIO, active-high or active-low)
//! - Status output (UART byte stream)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod heater;
pub mod sensor;
pub mod serial;
