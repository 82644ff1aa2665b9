//! Temperature sensor trait

use core::fmt;

use hearth_hal::I2cBusError;

/// Errors that can occur reading the temperature sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Device did not acknowledge
    Nack,
    /// Lost bus arbitration
    ArbitrationLost,
    /// Bus-level fault
    Bus,
    /// Transaction did not complete in time
    Timeout,
    /// Anything else the transport reports
    Other,
}

impl SensorError {
    /// Numeric status printed in the read-failure diagnostic
    pub fn status_code(&self) -> i16 {
        match self {
            SensorError::Other => -1,
            SensorError::Timeout => -3,
            SensorError::Nack => -5,
            SensorError::ArbitrationLost => -7,
            SensorError::Bus => -9,
        }
    }
}

impl From<I2cBusError> for SensorError {
    fn from(e: I2cBusError) -> Self {
        match e {
            I2cBusError::Nack => SensorError::Nack,
            I2cBusError::ArbitrationLost => SensorError::ArbitrationLost,
            I2cBusError::Bus => SensorError::Bus,
            I2cBusError::Timeout => SensorError::Timeout,
            I2cBusError::Overrun | I2cBusError::Other => SensorError::Other,
        }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            SensorError::Nack => "no acknowledge",
            SensorError::ArbitrationLost => "arbitration lost",
            SensorError::Bus => "bus error",
            SensorError::Timeout => "timeout",
            SensorError::Other => "transport error",
        };
        write!(f, "{} ({})", what, self.status_code())
    }
}

/// Trait for temperature sensors
///
/// Takes `&mut self` because a read is a bus transaction.
pub trait TemperatureSensor {
    /// Read the current temperature in whole degrees Celsius
    fn read_celsius(&mut self) -> Result<i16, SensorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_distinct_and_negative() {
        let all = [
            SensorError::Nack,
            SensorError::ArbitrationLost,
            SensorError::Bus,
            SensorError::Timeout,
            SensorError::Other,
        ];
        for (i, a) in all.iter().enumerate() {
            assert!(a.status_code() < 0);
            for b in &all[i + 1..] {
                assert_ne!(a.status_code(), b.status_code());
            }
        }
    }

    #[test]
    fn test_from_bus_error() {
        assert_eq!(SensorError::from(I2cBusError::Nack), SensorError::Nack);
        assert_eq!(SensorError::from(I2cBusError::Overrun), SensorError::Other);
        assert_eq!(SensorError::from(I2cBusError::Timeout).status_code(), -3);
    }
}
