//! Setpoint state machine
//!
//! Saturating ±1 adjustment of a bounded integer target temperature.

use super::events::ButtonEvent;
use crate::config::SetpointConfig;

/// Target temperature within a closed bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Setpoint {
    value: i16,
    min: i16,
    max: i16,
}

impl Setpoint {
    /// Create a setpoint, clamping `value` into `[min, max]`
    ///
    /// If `min > max` the bound collapses to `min`.
    pub fn new(value: i16, min: i16, max: i16) -> Self {
        let max = max.max(min);
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn from_config(config: &SetpointConfig) -> Self {
        Self::new(config.initial, config.min, config.max)
    }

    pub fn value(&self) -> i16 {
        self.value
    }

    pub fn min(&self) -> i16 {
        self.min
    }

    pub fn max(&self) -> i16 {
        self.max
    }

    /// Apply one button event
    ///
    /// Returns true if the setpoint moved. At a bound the event is a no-op
    /// (saturating, not wrapping).
    pub fn apply(&mut self, event: ButtonEvent) -> bool {
        match event {
            ButtonEvent::Increase if self.value < self.max => {
                self.value += 1;
                true
            }
            ButtonEvent::Decrease if self.value > self.min => {
                self.value -= 1;
                true
            }
            _ => false,
        }
    }
}

impl Default for Setpoint {
    fn default() -> Self {
        Self::from_config(&SetpointConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_defaults() {
        let sp = Setpoint::default();
        assert_eq!(sp.value(), 25);
        assert_eq!(sp.min(), 0);
        assert_eq!(sp.max(), 99);
    }

    #[test]
    fn test_none_is_noop() {
        let mut sp = Setpoint::new(40, 0, 99);
        assert!(!sp.apply(ButtonEvent::None));
        assert_eq!(sp.value(), 40);
    }

    #[test]
    fn test_saturates_at_bounds() {
        let mut sp = Setpoint::new(99, 0, 99);
        assert!(!sp.apply(ButtonEvent::Increase));
        assert_eq!(sp.value(), 99);

        let mut sp = Setpoint::new(0, 0, 99);
        assert!(!sp.apply(ButtonEvent::Decrease));
        assert_eq!(sp.value(), 0);
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(Setpoint::new(120, 0, 99).value(), 99);
        assert_eq!(Setpoint::new(-5, 0, 99).value(), 0);
        assert_eq!(Setpoint::new(7, 10, 3).value(), 10);
    }

    proptest! {
        #[test]
        fn prop_increase_inside_bound(s in 1i16..99) {
            let mut sp = Setpoint::new(s, 0, 99);
            prop_assert!(sp.apply(ButtonEvent::Increase));
            prop_assert_eq!(sp.value(), s + 1);
        }

        #[test]
        fn prop_decrease_inside_bound(s in 1i16..99) {
            let mut sp = Setpoint::new(s, 0, 99);
            prop_assert!(sp.apply(ButtonEvent::Decrease));
            prop_assert_eq!(sp.value(), s - 1);
        }

        #[test]
        fn prop_never_leaves_bound(start in 0i16..=99, events in proptest::collection::vec(0u8..3, 0..300)) {
            let mut sp = Setpoint::new(start, 0, 99);
            for raw in events {
                let before = sp.value();
                sp.apply(ButtonEvent::from_raw(raw));
                prop_assert!((0..=99).contains(&sp.value()));
                prop_assert!((sp.value() - before).abs() <= 1);
            }
        }
    }
}
