//! Configuration types
//!
//! Board-agnostic configuration, parsed from the embedded `thermostat.toml`.

pub mod toml;
pub mod types;

use core::fmt;

pub use self::toml::{parse_config, ParseError, ParseErrorKind};
pub use types::*;

/// Failure to turn TOML text into a usable configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Text is not valid for the TOML subset
    Parse(ParseError),
    /// Text parsed but the values are unusable
    Invalid(ConfigError),
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::Parse(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Parse(e) => write!(f, "parse error: {}", e),
            LoadError::Invalid(e) => write!(f, "invalid config: {}", e),
        }
    }
}

/// Parse and validate configuration text
pub fn load_config(input: &str) -> Result<ThermostatConfig, LoadError> {
    let config = parse_config(input)?;
    config.validate()?;
    Ok(config)
}
