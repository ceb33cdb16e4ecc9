// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./omnidesk.toml` > `~/.config/omnidesk/omnidesk.toml`
//! > `/etc/omnidesk/omnidesk.toml` with environment variable overrides via the
//! `OMNIDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::OmnideskConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/omnidesk/omnidesk.toml` (system-wide)
/// 3. `~/.config/omnidesk/omnidesk.toml` (user XDG config)
/// 4. `./omnidesk.toml` (local directory)
/// 5. `OMNIDESK_*` environment variables
pub fn load_config() -> Result<OmnideskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OmnideskConfig::default()))
        .merge(Toml::file("/etc/omnidesk/omnidesk.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("omnidesk/omnidesk.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("omnidesk.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<OmnideskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OmnideskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<OmnideskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OmnideskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `OMNIDESK_GATEWAY_CONNECT_TIMEOUT_SECS`
/// must map to `gateway.connect_timeout_secs`, not `gateway.connect.timeout.secs`.
/// The nested simulation section is mapped before the plain gateway prefix.
fn env_provider() -> Env {
    Env::prefixed("OMNIDESK_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("gateway_simulation_", "gateway.simulation.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("app_", "app.", 1);
        mapped.into()
    })
}
