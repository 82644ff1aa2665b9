//! Heater actuator trait

/// Trait for heater output control
///
/// Implementations drive the single binary actuator line. Driving the same
/// level twice is a no-op as far as the heater is concerned.
pub trait HeaterOutput {
    /// Turn the heater on or off
    fn set_on(&mut self, on: bool);

    /// Check if the heater is currently on
    fn is_on(&self) -> bool;
}
