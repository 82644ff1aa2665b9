//! Embedded configuration
//!
//! `thermostat.toml` is compiled into the image; build.rs has already
//! checked it, so a rejection here means the two validators disagree.

use defmt::*;

use hearth_core::config::{load_config, ThermostatConfig};

/// Edit thermostat.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../thermostat.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> ThermostatConfig {
    match load_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: tick={}ms setpoint={} in [{}, {}] rollover={}",
                config.tick_period_ms,
                config.setpoint.initial,
                config.setpoint.min,
                config.setpoint.max,
                config.seconds_rollover
            );
            config
        }
        Err(e) => {
            warn!("Embedded config rejected ({}), using defaults", e);
            ThermostatConfig::default()
        }
    }
}
