//! UART status output

use hearth_core::traits::{OutputError, StatusOutput};
use hearth_hal::UartTx;

/// Status records and diagnostics over a UART transmitter
pub struct UartStatusOutput<U> {
    uart: U,
}

impl<U: UartTx> UartStatusOutput<U> {
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    pub fn into_inner(self) -> U {
        self.uart
    }
}

impl<U: UartTx> StatusOutput for UartStatusOutput<U> {
    fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        self.uart.write_blocking(line.as_bytes())?;
        Ok(())
    }
}
