//! # Realtime Socket
//!
//! `GET /ws` accepts WebSocket connections and keeps a registry of who is
//! connected. There is no message protocol: incoming frames are logged and
//! dropped, and nothing is ever pushed to clients.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Browser ──► GET /ws (upgrade)                                         │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          register(client_id, addr)                                     │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          receive loop: Text/Binary → debug log, ignored                │
//! │                        Close / error / EOF → exit                      │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          deregister(client_id)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Upper bound on a single frame; clients have nothing to send.
const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// A connected socket.
#[derive(Debug, Clone)]
pub struct ConnectedClient {
    pub addr: SocketAddr,
    pub connected_at: DateTime<Utc>,
}

/// Registry of open sockets.
#[derive(Debug, Clone, Default)]
pub struct RealtimeState {
    clients: Arc<RwLock<HashMap<String, ConnectedClient>>>,
}

impl RealtimeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new connection and returns its id.
    pub async fn register(&self, addr: SocketAddr) -> String {
        let client_id = Uuid::new_v4().to_string();
        let mut clients = self.clients.write().await;
        clients.insert(
            client_id.clone(),
            ConnectedClient {
                addr,
                connected_at: Utc::now(),
            },
        );
        info!(client_id = %client_id, addr = %addr, total = clients.len(), "Socket connected");
        client_id
    }

    pub async fn deregister(&self, client_id: &str) {
        let mut clients = self.clients.write().await;
        if let Some(client) = clients.remove(client_id) {
            let secs = (Utc::now() - client.connected_at).num_seconds();
            info!(
                client_id = %client_id,
                addr = %client.addr,
                connected_secs = secs,
                total = clients.len(),
                "Socket disconnected"
            );
        }
    }

    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }
}

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    debug!(addr = %addr, "WebSocket upgrade requested");
    let realtime = state.realtime.clone();
    ws.max_message_size(MAX_MESSAGE_SIZE)
        .on_upgrade(move |socket| handle_socket(socket, realtime, addr))
}

async fn handle_socket(mut socket: WebSocket, realtime: RealtimeState, addr: SocketAddr) {
    let client_id = realtime.register(addr).await;

    while let Some(frame) = socket.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                debug!(client_id = %client_id, len = text.len(), "Ignoring text frame");
            }
            Ok(Message::Binary(data)) => {
                debug!(client_id = %client_id, len = data.len(), "Ignoring binary frame");
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
            Ok(Message::Close(_)) => {
                debug!(client_id = %client_id, "Client requested close");
                break;
            }
            Err(e) => {
                warn!(client_id = %client_id, ?e, "WebSocket error");
                break;
            }
        }
    }

    realtime.deregister(&client_id).await;
}
