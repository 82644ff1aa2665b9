//! Heater state machine
//!
//! Level-triggered threshold control without a hysteresis band: the heater
//! is on exactly when the last evaluated temperature was below the setpoint.

/// Heater actuation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaterState {
    #[default]
    Off,
    On,
}

impl HeaterState {
    /// Next state for the given inputs
    ///
    /// Evaluated once per heater trigger with the most recent reading; a
    /// setpoint change takes effect at the next evaluation, not before.
    pub fn transition(self, temperature: i16, setpoint: i16) -> Self {
        use HeaterState::*;

        match self {
            Off if temperature < setpoint => On,
            On if temperature >= setpoint => Off,
            // Self-transition
            _ => self,
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, HeaterState::On)
    }

    /// `0` for Off, `1` for On, as printed in the status record
    pub fn as_digit(&self) -> u8 {
        match self {
            HeaterState::Off => 0,
            HeaterState::On => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_state_off() {
        assert_eq!(HeaterState::default(), HeaterState::Off);
    }

    #[test]
    fn test_off_to_on_below_setpoint() {
        assert_eq!(HeaterState::Off.transition(20, 25), HeaterState::On);
    }

    #[test]
    fn test_on_to_off_at_setpoint() {
        assert_eq!(HeaterState::On.transition(25, 25), HeaterState::Off);
        assert_eq!(HeaterState::On.transition(26, 25), HeaterState::Off);
    }

    #[test]
    fn test_self_transitions() {
        assert_eq!(HeaterState::Off.transition(30, 25), HeaterState::Off);
        assert_eq!(HeaterState::On.transition(10, 25), HeaterState::On);
    }

    #[test]
    fn test_digit() {
        assert_eq!(HeaterState::Off.as_digit(), 0);
        assert_eq!(HeaterState::On.as_digit(), 1);
    }

    proptest! {
        #[test]
        fn prop_on_iff_below(start_on in any::<bool>(), temperature in any::<i16>(), setpoint in -100i16..200) {
            let start = if start_on { HeaterState::On } else { HeaterState::Off };
            let next = start.transition(temperature, setpoint);
            prop_assert_eq!(next.is_on(), temperature < setpoint);

            // Idempotent under unchanged inputs
            prop_assert_eq!(next.transition(temperature, setpoint), next);
        }
    }
}
