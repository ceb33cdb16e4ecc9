// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: recognized log levels, ws/wss endpoints, non-zero timings,
//! and probability bounds.

use crate::diagnostic::ConfigError;
use crate::model::OmnideskConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &OmnideskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.app.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.name must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.app.log_level
            ),
        });
    }

    if let Some(ref endpoint) = config.gateway.endpoint {
        if !endpoint.starts_with("ws://") && !endpoint.starts_with("wss://") {
            errors.push(ConfigError::Validation {
                message: format!(
                    "gateway.endpoint must be a ws:// or wss:// URL, got `{endpoint}`"
                ),
            });
        }
    }

    if config.gateway.connect_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.connect_timeout_secs must be greater than zero".to_string(),
        });
    }

    let sim = &config.gateway.simulation;
    for (key, value) in [
        ("message_interval_secs", sim.message_interval_secs),
        ("typing_interval_secs", sim.typing_interval_secs),
        ("delivered_delay_ms", sim.delivered_delay_ms),
        ("read_delay_ms", sim.read_delay_ms),
    ] {
        if value == 0 {
            errors.push(ConfigError::Validation {
                message: format!("gateway.simulation.{key} must be greater than zero"),
            });
        }
    }

    if !(0.0..=1.0).contains(&sim.typing_probability) {
        errors.push(ConfigError::Validation {
            message: format!(
                "gateway.simulation.typing_probability must be between 0 and 1, got {}",
                sim.typing_probability
            ),
        });
    }

    // The delivered/read timers are scheduled independently from the same
    // instant; read firing before delivered would reorder the progression.
    if sim.read_delay_ms < sim.delivered_delay_ms {
        errors.push(ConfigError::Validation {
            message: format!(
                "gateway.simulation.read_delay_ms ({}) must not be less than delivered_delay_ms ({})",
                sim.read_delay_ms, sim.delivered_delay_ms
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
