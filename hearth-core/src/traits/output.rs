//! Status output trait

use core::fmt;

use hearth_hal::UartError;

use crate::report::Diagnostic;

/// Errors from the status byte sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// The transport rejected or dropped the bytes
    Transport,
    /// The transport accepted no bytes
    WriteZero,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Transport => f.write_str("status transport error"),
            OutputError::WriteZero => f.write_str("status transport accepted no bytes"),
        }
    }
}

impl From<UartError> for OutputError {
    fn from(e: UartError) -> Self {
        match e {
            UartError::WriteZero => OutputError::WriteZero,
            UartError::Peripheral | UartError::Other => OutputError::Transport,
        }
    }
}

/// Byte-stream sink for status records and diagnostics
///
/// `line` already carries its terminator; implementations write it as-is.
pub trait StatusOutput {
    fn write_line(&mut self, line: &str) -> Result<(), OutputError>;

    /// Format and write a diagnostic
    fn emit(&mut self, diagnostic: Diagnostic) -> Result<(), OutputError> {
        self.write_line(&diagnostic.format())
    }
}
