//! Minimal TOML parser for thermostat configuration
//!
//! Handles only the subset `thermostat.toml` needs, without allocation.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (integer, boolean, basic string)
//! - Underscore digit separators (`400_000`)
//! - Comments (`# ...`), full-line or trailing
//!
//! NOT supported:
//! - Arrays, inline tables, dotted keys
//! - Multi-line or literal strings, escapes
//! - Floats and datetimes

use core::fmt;

use super::types::{SecondsRollover, ThermostatConfig};

/// What went wrong on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Malformed or unknown section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    MissingEquals,
    /// Key not recognised in its section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
}

/// Parse error with 1-based line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ParseErrorKind::InvalidSection => "invalid section header",
            ParseErrorKind::MissingEquals => "expected `key = value`",
            ParseErrorKind::UnknownKey => "unknown key",
            ParseErrorKind::InvalidValue => "invalid value",
        };
        write!(f, "line {}: {}", self.line, what)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Setpoint,
    Sensor,
    Report,
    Heater,
}

/// Parse TOML text into a configuration
///
/// Keys that are absent keep their default. The result is not validated;
/// see [`ThermostatConfig::validate`].
pub fn parse_config(input: &str) -> Result<ThermostatConfig, ParseError> {
    let mut config = ThermostatConfig::default();
    let mut section = Section::Root;

    for (index, raw_line) in input.lines().enumerate() {
        let line_no = index + 1;
        let err = |kind| ParseError {
            line: line_no,
            kind,
        };

        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(err(ParseErrorKind::InvalidSection));
            }
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(err(ParseErrorKind::InvalidSection))?;
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(err(ParseErrorKind::MissingEquals))?;
        apply_key(&mut config, section, key.trim(), value.trim()).map_err(err)?;
    }

    Ok(config)
}

/// Drop a trailing `# comment`, ignoring `#` inside a quoted string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_section_header(name: &str) -> Option<Section> {
    match name.trim() {
        "timing" => Some(Section::Timing),
        "setpoint" => Some(Section::Setpoint),
        "sensor" => Some(Section::Sensor),
        "report" => Some(Section::Report),
        "heater" => Some(Section::Heater),
        _ => None,
    }
}

fn apply_key(
    config: &mut ThermostatConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseErrorKind> {
    match (section, key) {
        (Section::Timing, "tick_ms") => config.tick_period_ms = parse_u32(value)?,
        (Section::Timing, "setpoint_ms") => config.periods.setpoint_ms = parse_u32(value)?,
        (Section::Timing, "temperature_ms") => config.periods.temperature_ms = parse_u32(value)?,
        (Section::Timing, "heater_ms") => config.periods.heater_ms = parse_u32(value)?,
        (Section::Timing, "report_ms") => config.periods.report_ms = parse_u32(value)?,

        (Section::Setpoint, "initial") => config.setpoint.initial = parse_i16(value)?,
        (Section::Setpoint, "min") => config.setpoint.min = parse_i16(value)?,
        (Section::Setpoint, "max") => config.setpoint.max = parse_i16(value)?,

        (Section::Sensor, "initial_temperature") => {
            config.initial_temperature = parse_i16(value)?
        }
        (Section::Sensor, "i2c_frequency") => config.i2c.frequency = parse_u32(value)?,

        (Section::Report, "baudrate") => config.uart.baudrate = parse_u32(value)?,
        (Section::Report, "seconds_rollover") => {
            config.seconds_rollover = SecondsRollover::from_name(parse_string(value)?)
                .ok_or(ParseErrorKind::InvalidValue)?
        }

        (Section::Heater, "active_low") => config.heater_active_low = parse_bool(value)?,

        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

/// Parse a decimal integer with optional sign and `_` separators
fn parse_int(value: &str) -> Option<i64> {
    let (negative, digits) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };

    let mut seen_digit = false;
    let mut acc: i64 = 0;
    for c in digits.chars() {
        match c {
            '_' if seen_digit => {}
            '0'..='9' => {
                seen_digit = true;
                acc = acc.checked_mul(10)?.checked_add(i64::from(c as u8 - b'0'))?;
            }
            _ => return None,
        }
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -acc } else { acc })
}

fn parse_u32(value: &str) -> Result<u32, ParseErrorKind> {
    parse_int(value)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(ParseErrorKind::InvalidValue)
}

fn parse_i16(value: &str) -> Result<i16, ParseErrorKind> {
    parse_int(value)
        .and_then(|v| i16::try_from(v).ok())
        .ok_or(ParseErrorKind::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseErrorKind> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}

fn parse_string(value: &str) -> Result<&str, ParseErrorKind> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseErrorKind::InvalidValue)
}
