//! Bridges from the embedded-hal ecosystem
//!
//! Chip HALs (embassy-rp on the target) implement `embedded-hal` 1.0 and
//! `embedded-io`. These wrappers expose them through the Hearth traits so the
//! drivers stay chip-agnostic.

use embedded_hal::digital::OutputPin as EhOutputPin;
use embedded_hal::i2c::{Error as _, ErrorKind as I2cErrorKind, I2c};
use embedded_io::{Error as _, ErrorKind as IoErrorKind, Write};

use crate::gpio::OutputPin;
use crate::i2c::{I2cBus, I2cBusError};
use crate::uart::{UartError, UartTx};

impl From<I2cErrorKind> for I2cBusError {
    fn from(kind: I2cErrorKind) -> Self {
        match kind {
            I2cErrorKind::Bus => I2cBusError::Bus,
            I2cErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            I2cErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
            I2cErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

impl From<IoErrorKind> for UartError {
    fn from(kind: IoErrorKind) -> Self {
        match kind {
            IoErrorKind::WriteZero => UartError::WriteZero,
            IoErrorKind::Other => UartError::Other,
            _ => UartError::Peripheral,
        }
    }
}

/// [`I2cBus`] over any blocking `embedded_hal::i2c::I2c`
pub struct EhI2c<B> {
    bus: B,
}

impl<B: I2c> EhI2c<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Release the wrapped bus
    pub fn into_inner(self) -> B {
        self.bus
    }
}

impl<B: I2c> I2cBus for EhI2c<B> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError> {
        self.bus
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cBusError> {
        self.bus
            .read(address, buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cBusError> {
        self.bus
            .write_read(address, write_data, read_buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}

/// [`OutputPin`] over any `embedded_hal::digital::OutputPin`
///
/// The driven level is tracked here because `StatefulOutputPin` needs
/// `&mut self` to query it. A rejected write leaves the tracked level
/// alone and is counted in [`EhOutput::write_errors`].
pub struct EhOutput<P> {
    pin: P,
    high: bool,
    write_errors: u16,
}

impl<P: EhOutputPin> EhOutput<P> {
    /// Wrap a pin whose current level is `initially_high`
    pub fn new(pin: P, initially_high: bool) -> Self {
        Self {
            pin,
            high: initially_high,
            write_errors: 0,
        }
    }

    /// Level writes the pin rejected since construction
    pub fn write_errors(&self) -> u16 {
        self.write_errors
    }

    fn drive(&mut self, high: bool) {
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match result {
            Ok(()) => self.high = high,
            Err(_e) => {
                self.write_errors = self.write_errors.saturating_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "output pin rejected level {}: {}",
                    high,
                    defmt::Debug2Format(&_e)
                );
            }
        }
    }
}

impl<P: EhOutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        self.drive(true);
    }

    fn set_low(&mut self) {
        self.drive(false);
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// [`UartTx`] over any blocking `embedded_io::Write`
pub struct IoUart<W> {
    writer: W,
}

impl<W: Write> IoUart<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> UartTx for IoUart<W> {
    fn write_blocking(&mut self, mut data: &[u8]) -> Result<(), UartError> {
        // embedded-io's write_all panics on a zero-length write; report it instead
        while !data.is_empty() {
            match self.writer.write(data) {
                Ok(0) => return Err(UartError::WriteZero),
                Ok(n) => data = &data[n..],
                Err(e) => return Err(UartError::from(e.kind())),
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), UartError> {
        self.writer.flush().map_err(|e| UartError::from(e.kind()))
    }
}
