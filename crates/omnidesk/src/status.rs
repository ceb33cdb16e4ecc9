// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `omnidesk status` command implementation.
//!
//! Displays the effective configuration summary and the gateway mode a
//! `serve` run would start in. There is no daemon endpoint to probe; the
//! inbox core is an in-process subsystem, so status is derived from
//! configuration alone.

use std::io::IsTerminal;

use omnidesk_config::model::OmnideskConfig;
use omnidesk_core::OmnideskError;
use serde::Serialize;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub app_name: String,
    pub log_level: String,
    /// Mode `serve` would start in: "connected" with an endpoint configured
    /// (falling back to "simulated" if unreachable), "simulated" otherwise.
    pub gateway_mode: String,
    pub endpoint: Option<String>,
    pub message_interval_secs: u64,
    pub typing_interval_secs: u64,
}

/// Run the `omnidesk status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub fn run_status(config: &OmnideskConfig, json: bool, plain: bool) -> Result<(), OmnideskError> {
    let gateway_mode = if config.gateway.endpoint.is_some() {
        "connected"
    } else {
        "simulated"
    };

    if json {
        let resp = StatusResponse {
            app_name: config.app.name.clone(),
            log_level: config.app.log_level.clone(),
            gateway_mode: gateway_mode.to_string(),
            endpoint: config.gateway.endpoint.clone(),
            message_interval_secs: config.gateway.simulation.message_interval_secs,
            typing_interval_secs: config.gateway.simulation.typing_interval_secs,
        };
        let rendered = serde_json::to_string_pretty(&resp)
            .map_err(|e| OmnideskError::Internal(format!("failed to render status: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    print_status(config, gateway_mode, use_color);
    Ok(())
}

fn print_status(config: &OmnideskConfig, gateway_mode: &str, use_color: bool) {
    println!();
    println!("  omnidesk status");
    println!("  {}", "-".repeat(35));
    println!("    App:      {}", config.app.name);
    println!("    Logging:  {}", config.app.log_level);

    if use_color {
        use colored::Colorize;
        match gateway_mode {
            "connected" => println!("    Gateway:  {} (backend configured)", "connected".green()),
            _ => println!("    Gateway:  {} (no endpoint)", "simulated".yellow()),
        }
    } else {
        match gateway_mode {
            "connected" => println!("    Gateway:  connected (backend configured)"),
            _ => println!("    Gateway:  simulated (no endpoint)"),
        }
    }

    match &config.gateway.endpoint {
        Some(endpoint) => println!("    Endpoint: {endpoint}"),
        None => println!(
            "    Traffic:  every {}s, typing rolls every {}s",
            config.gateway.simulation.message_interval_secs,
            config.gateway.simulation.typing_interval_secs
        ),
    }
    println!();
    println!("  Start with: omnidesk serve");
    println!();
}
