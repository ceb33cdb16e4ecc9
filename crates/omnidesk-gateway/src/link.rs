// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Real WebSocket link to the messaging backend.
//!
//! Frames are JSON-encoded [`GatewayFrame`]s. The read task decodes inbound
//! frames and hands them to the dispatcher; malformed frames are logged and
//! dropped so one bad event cannot halt the stream.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use omnidesk_core::{GatewayFrame, OmnideskError, PresenceAnnouncement};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::registry::EventDispatcher;

type WsSink =
    futures::stream::SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, WsMessage>;

/// An established connection to the backend.
pub(crate) struct WsLink {
    sink: tokio::sync::Mutex<WsSink>,
    read_task: tokio::task::JoinHandle<()>,
}

impl WsLink {
    /// Connects to `endpoint` within `timeout`, announces presence, and
    /// spawns the read loop.
    pub async fn connect(
        endpoint: &str,
        timeout: Duration,
        announce: PresenceAnnouncement,
        dispatcher: EventDispatcher,
    ) -> Result<Self, OmnideskError> {
        let (stream, _response) = tokio::time::timeout(timeout, connect_async(endpoint))
            .await
            .map_err(|_| OmnideskError::Timeout { duration: timeout })?
            .map_err(|e| OmnideskError::Transport {
                message: format!("websocket handshake with {endpoint} failed"),
                source: Some(Box::new(e)),
            })?;

        info!(endpoint = %endpoint, "websocket connected");

        let (mut sink, mut source) = stream.split();

        // Announce identity and role before any other traffic.
        let frame = encode_frame(&GatewayFrame::Presence(announce))?;
        sink.send(WsMessage::text(frame))
            .await
            .map_err(|e| OmnideskError::Transport {
                message: "failed to send presence announcement".to_string(),
                source: Some(Box::new(e)),
            })?;

        let read_task = tokio::spawn(async move {
            while let Some(item) = source.next().await {
                match item {
                    Ok(WsMessage::Text(text)) => {
                        match serde_json::from_str::<GatewayFrame>(text.as_str()) {
                            Ok(frame) => {
                                if let Some(event) = frame.into_event() {
                                    dispatcher.dispatch(event);
                                }
                            }
                            Err(e) => {
                                // One bad frame must not halt the stream.
                                warn!(error = %e, "dropping malformed gateway frame");
                            }
                        }
                    }
                    Ok(WsMessage::Close(_)) => {
                        info!("backend closed the websocket");
                        break;
                    }
                    Ok(_) => {
                        // Binary/ping/pong frames carry no events.
                    }
                    Err(e) => {
                        warn!(error = %e, "websocket read error, stopping read loop");
                        break;
                    }
                }
            }
            debug!("websocket read loop finished");
        });

        Ok(Self {
            sink: tokio::sync::Mutex::new(sink),
            read_task,
        })
    }

    /// Serializes and sends one frame.
    pub async fn send_frame(&self, frame: &GatewayFrame) -> Result<(), OmnideskError> {
        let json = encode_frame(frame)?;
        self.sink
            .lock()
            .await
            .send(WsMessage::text(json))
            .await
            .map_err(|e| OmnideskError::Transport {
                message: "failed to send frame".to_string(),
                source: Some(Box::new(e)),
            })
    }

    /// Closes the link and stops the read loop.
    pub async fn close(&self) {
        if let Err(e) = self.sink.lock().await.close().await {
            debug!(error = %e, "error closing websocket sink");
        }
        self.read_task.abort();
    }
}

fn encode_frame(frame: &GatewayFrame) -> Result<String, OmnideskError> {
    serde_json::to_string(frame).map_err(|e| OmnideskError::Codec {
        source: Box::new(e),
    })
}
