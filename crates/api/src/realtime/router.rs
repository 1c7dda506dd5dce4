//! Event-to-WebSocket routing engine.
//!
//! [`RealtimeRouter`] subscribes to the platform event bus and pushes each
//! event to the WebSocket connections of its target users. This is the live
//! half of message delivery: `send_message` already returned the persisted
//! row to the sender, so the push channel is at-least-once and consumers
//! de-duplicate by message id.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;
use codabrate_events::PlatformEvent;

use crate::ws::WsManager;

/// Routes platform events to the affected users' WebSocket connections.
pub struct RealtimeRouter {
    ws_manager: Arc<WsManager>,
}

impl RealtimeRouter {
    /// Create a new router over the given WebSocket manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](codabrate_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.route_event(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Realtime router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, realtime router shutting down");
                    break;
                }
            }
        }
    }

    /// Push a single event to every target user's connections.
    ///
    /// Events carry their target list; a user with no open connection simply
    /// misses the push and reloads state over HTTP on the next visit.
    async fn route_event(&self, event: &PlatformEvent) {
        let frame = serde_json::json!({
            "type": event.event_type,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let ws_msg = Message::Text(frame.to_string().into());

        for &user_id in &event.target_user_ids {
            let delivered = self
                .ws_manager
                .send_to_user(user_id, ws_msg.clone())
                .await;
            tracing::debug!(
                event_type = %event.event_type,
                user_id,
                delivered,
                "Routed event"
            );
        }
    }
}
