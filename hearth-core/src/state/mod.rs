//! State machines
//!
//! Both machines are explicit, finite and deterministic: output is a
//! function of the current state and one input.

pub mod events;
pub mod heater;
pub mod setpoint;

pub use events::{ButtonEvent, ButtonLatch};
pub use heater::HeaterState;
pub use setpoint::Setpoint;
