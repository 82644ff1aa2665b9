//! Build script for hearth-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates thermostat.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted per section, with their expected TOML type
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "timing",
        &[
            ("tick_ms", Kind::Integer),
            ("setpoint_ms", Kind::Integer),
            ("temperature_ms", Kind::Integer),
            ("heater_ms", Kind::Integer),
            ("report_ms", Kind::Integer),
        ],
    ),
    (
        "setpoint",
        &[
            ("initial", Kind::Integer),
            ("min", Kind::Integer),
            ("max", Kind::Integer),
        ],
    ),
    (
        "sensor",
        &[
            ("initial_temperature", Kind::Integer),
            ("i2c_frequency", Kind::Integer),
        ],
    ),
    (
        "report",
        &[("baudrate", Kind::Integer), ("seconds_rollover", Kind::String)],
    ),
    ("heater", &[("active_low", Kind::Boolean)]),
];

#[derive(Clone, Copy, PartialEq)]
enum Kind {
    Integer,
    Boolean,
    String,
}

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate thermostat.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=thermostat.toml");

    let config_path = Path::new("thermostat.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(&format!("cannot read thermostat.toml: {}", e)),
    };

    let config: toml::Table = match content.parse() {
        Ok(table) => table,
        Err(e) => fail(&format!("invalid TOML syntax in thermostat.toml:\n{}", e)),
    };

    let mut errors = Vec::new();
    check_schema(&config, &mut errors);
    check_values(&config, &mut errors);

    if !errors.is_empty() {
        fail(&errors.join("\n"));
    }

    println!("cargo:warning=thermostat.toml validated successfully");
}

fn fail(msg: &str) -> ! {
    let body = msg
        .lines()
        .map(|line| format!("║  {:<64} ║", line))
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: thermostat.toml rejected                                 ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        body
    );
}

/// Only known sections and keys, each with the right type
fn check_schema(config: &toml::Table, errors: &mut Vec<String>) {
    for (section, value) in config {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("'{}' must be a [section]", section));
            continue;
        };

        for (key, value) in table {
            match keys.iter().find(|(name, _)| *name == key.as_str()) {
                None => errors.push(format!("[{}] unknown key '{}'", section, key)),
                Some((_, kind)) => {
                    let ok = match kind {
                        Kind::Integer => value.is_integer(),
                        Kind::Boolean => value.is_bool(),
                        Kind::String => value.is_str(),
                    };
                    if !ok {
                        errors.push(format!("[{}] '{}' has the wrong type", section, key));
                    }
                }
            }
        }
    }
}

fn get_int(config: &toml::Table, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Range and consistency checks, mirroring `ThermostatConfig::validate`
fn check_values(config: &toml::Table, errors: &mut Vec<String>) {
    let tick = get_int(config, "timing", "tick_ms").unwrap_or(100);
    if !(1..=i64::from(u32::MAX)).contains(&tick) {
        errors.push(format!("[timing] tick_ms must be positive, got {}", tick));
    }

    for (key, default) in [
        ("setpoint_ms", 200),
        ("temperature_ms", 500),
        ("heater_ms", 1000),
        ("report_ms", 1000),
    ] {
        let period = get_int(config, "timing", key).unwrap_or(default);
        if period < tick || period > i64::from(u32::MAX) {
            errors.push(format!(
                "[timing] {} = {} must be at least tick_ms ({})",
                key, period, tick
            ));
        }
    }

    let initial = get_int(config, "setpoint", "initial").unwrap_or(25);
    let min = get_int(config, "setpoint", "min").unwrap_or(0);
    let max = get_int(config, "setpoint", "max").unwrap_or(99);
    for (key, v) in [("initial", initial), ("min", min), ("max", max)] {
        if i16::try_from(v).is_err() {
            errors.push(format!("[setpoint] {} = {} does not fit i16", key, v));
        }
    }
    if min > max {
        errors.push(format!("[setpoint] min ({}) is above max ({})", min, max));
    } else if !(min..=max).contains(&initial) {
        errors.push(format!(
            "[setpoint] initial ({}) is outside [{}, {}]",
            initial, min, max
        ));
    }

    if let Some(t) = get_int(config, "sensor", "initial_temperature") {
        if i16::try_from(t).is_err() {
            errors.push(format!("[sensor] initial_temperature = {} does not fit i16", t));
        }
    }
    if let Some(f) = get_int(config, "sensor", "i2c_frequency") {
        if !(1..=1_000_000).contains(&f) {
            errors.push(format!("[sensor] i2c_frequency = {} must be 1..=1000000 Hz", f));
        }
    }

    if let Some(b) = get_int(config, "report", "baudrate") {
        if !(1..=i64::from(u32::MAX)).contains(&b) {
            errors.push(format!("[report] baudrate = {} must be positive", b));
        }
    }
    if let Some(policy) = config
        .get("report")
        .and_then(|r| r.get("seconds_rollover"))
        .and_then(|v| v.as_str())
    {
        if !matches!(policy, "wrap" | "saturate" | "widen") {
            errors.push(format!(
                "[report] seconds_rollover = \"{}\" must be wrap, saturate or widen",
                policy
            ));
        }
    }
}
