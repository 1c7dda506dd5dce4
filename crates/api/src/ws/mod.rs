//! WebSocket infrastructure for real-time message delivery.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handler used by Axum routes. Every connection is bound to an
//! authenticated user; the realtime router pushes events to a user's
//! connections via [`WsManager::send_to_user`].

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
