//! Digital output for the heater line
//!
//! Implementations own the driven level; callers never read the pad back.

/// Push-pull digital output
pub trait OutputPin {
    /// Drive logic 1
    fn set_high(&mut self);

    /// Drive logic 0
    fn set_low(&mut self);

    /// Drive `high` as a level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }

    /// Level last driven
    fn is_set_high(&self) -> bool;

    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Drive a pin through a borrow, leaving ownership with the caller
impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    fn set_high(&mut self) {
        (**self).set_high()
    }

    fn set_low(&mut self) {
        (**self).set_low()
    }

    fn is_set_high(&self) -> bool {
        (**self).is_set_high()
    }
}
