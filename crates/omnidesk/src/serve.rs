// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `omnidesk serve` command implementation.
//!
//! Boots the inbox core: initializes the conversation store, connects the
//! transport gateway (real backend or simulation fallback), and wires the
//! event relay between them. Runs until SIGTERM/SIGINT, then tears down the
//! gateway and drains the relay.

use std::sync::Arc;
use std::time::Duration;

use omnidesk_config::model::OmnideskConfig;
use omnidesk_core::OmnideskError;
use omnidesk_gateway::TransportGateway;
use omnidesk_store::{ConversationStore, EventRelay};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// How often the running stats summary is logged.
const STATS_INTERVAL: Duration = Duration::from_secs(60);

/// Runs the `omnidesk serve` command.
///
/// Never fails on an unreachable backend; the gateway falls back to
/// simulation mode and the store keeps receiving traffic either way.
pub async fn run_serve(config: OmnideskConfig) -> Result<(), OmnideskError> {
    init_tracing(&config.app.log_level);

    info!(app = config.app.name.as_str(), "starting omnidesk serve");

    let mut store = ConversationStore::new();
    store.initialize();
    let store = store.into_shared();

    let gateway = Arc::new(TransportGateway::new(
        config.gateway.clone(),
        config.app.name.clone(),
    ));
    let relay = EventRelay::spawn(&gateway, store.clone());

    gateway.connect().await;
    info!(mode = %gateway.mode().await, "gateway channel established");

    let cancel = install_signal_handler();

    // Periodic stats summary until shutdown.
    let mut interval = tokio::time::interval(STATS_INTERVAL);
    interval.tick().await; // skip the immediate first tick
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let stats = store.lock().await.stats();
                info!(
                    total = stats.total,
                    unread = stats.unread,
                    pending = stats.pending,
                    "conversation store stats"
                );
            }
            _ = cancel.cancelled() => break,
        }
    }

    gateway.disconnect().await;
    relay.shutdown().await;

    info!("omnidesk serve shutdown complete");
    Ok(())
}

/// Installs signal handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] that is cancelled when either signal is
/// received.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => {
                            info!("received SIGINT (Ctrl+C), initiating shutdown");
                        }
                        _ = sigterm.recv() => {
                            info!("received SIGTERM, initiating shutdown");
                        }
                    }
                }
                Err(e) => {
                    debug!(error = %e, "SIGTERM handler unavailable, using Ctrl+C only");
                    let _ = ctrl_c.await;
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("omnidesk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
