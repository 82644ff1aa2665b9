//! GPIO heater actuator
//!
//! Drives the heater through one digital line (relay, SSR or MOSFET gate).

use hearth_core::traits::HeaterOutput;
use hearth_hal::OutputPin;

/// Heater on a single GPIO line
///
/// The logical heater state is derived from the driven pin level, so it can
/// never disagree with what the hardware was told.
pub struct GpioHeater<P> {
    pin: P,
    /// Heater ON = pin LOW
    active_low: bool,
}

impl<P: OutputPin> GpioHeater<P> {
    /// Take the pin and drive the heater off
    pub fn new(pin: P, active_low: bool) -> Self {
        let mut heater = Self { pin, active_low };
        heater.set_on(false);
        heater
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    pub fn is_active_low(&self) -> bool {
        self.active_low
    }

    /// Pin level that represents `on`
    fn level_for(&self, on: bool) -> bool {
        on != self.active_low
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> HeaterOutput for GpioHeater<P> {
    fn set_on(&mut self, on: bool) {
        let level = self.level_for(on);
        self.pin.set_state(level);
    }

    fn is_on(&self) -> bool {
        self.pin.is_set_high() != self.active_low
    }
}
