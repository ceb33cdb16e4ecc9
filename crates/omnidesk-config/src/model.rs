// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Omnidesk inbox core.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Omnidesk configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values, so a missing config file is never an error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OmnideskConfig {
    /// Application identity and logging settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Transport gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name announced to the backend on connect.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "omnidesk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Transport gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// WebSocket endpoint of the messaging backend (`ws://` or `wss://`).
    /// When unset, the gateway starts directly in simulation mode.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// How long to wait for the connection handshake before falling back
    /// to simulation mode.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Simulation-mode timing parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            simulation: SimulationConfig::default(),
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Timing parameters for simulation mode.
///
/// The defaults mirror the demo cadence the product ships with, but none
/// of them is load-bearing; tests run them under virtual time.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Interval between synthesized inbound messages.
    #[serde(default = "default_message_interval_secs")]
    pub message_interval_secs: u64,

    /// Interval between typing-indicator rolls.
    #[serde(default = "default_typing_interval_secs")]
    pub typing_interval_secs: u64,

    /// Probability that a typing roll emits a start/stop pair.
    #[serde(default = "default_typing_probability")]
    pub typing_probability: f64,

    /// Delay before a sent message is reported delivered.
    #[serde(default = "default_delivered_delay_ms")]
    pub delivered_delay_ms: u64,

    /// Delay before a sent message is reported read.
    #[serde(default = "default_read_delay_ms")]
    pub read_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            message_interval_secs: default_message_interval_secs(),
            typing_interval_secs: default_typing_interval_secs(),
            typing_probability: default_typing_probability(),
            delivered_delay_ms: default_delivered_delay_ms(),
            read_delay_ms: default_read_delay_ms(),
        }
    }
}

fn default_message_interval_secs() -> u64 {
    30
}

fn default_typing_interval_secs() -> u64 {
    15
}

fn default_typing_probability() -> f64 {
    0.3
}

fn default_delivered_delay_ms() -> u64 {
    1000
}

fn default_read_delay_ms() -> u64 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = OmnideskConfig::default();
        assert_eq!(config.app.name, "omnidesk");
        assert_eq!(config.app.log_level, "info");
        assert!(config.gateway.endpoint.is_none());
        assert_eq!(config.gateway.connect_timeout_secs, 10);
        assert_eq!(config.gateway.simulation.message_interval_secs, 30);
        assert_eq!(config.gateway.simulation.typing_interval_secs, 15);
        assert_eq!(config.gateway.simulation.delivered_delay_ms, 1000);
        assert_eq!(config.gateway.simulation.read_delay_ms, 3000);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = OmnideskConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let back: OmnideskConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.app.name, config.app.name);
        assert_eq!(
            back.gateway.simulation.read_delay_ms,
            config.gateway.simulation.read_delay_ms
        );
    }
}
