//! Event-to-WebSocket routing.

mod router;

pub use router::RealtimeRouter;
