//! CodaBrate event bus.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] — the canonical domain event envelope, published by
//!   handlers when an application is submitted or decided and when a
//!   message is sent, and consumed by the realtime router for WebSocket
//!   fan-out.

pub mod bus;

pub use bus::{EventBus, PlatformEvent};
