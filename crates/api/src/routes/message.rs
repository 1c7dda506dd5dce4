//! Route definitions for the `/messages` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::message;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// GET  /                 -> inbox
/// GET  /unread-count     -> unread_count
/// GET  /{user_id}        -> thread
/// POST /{user_id}        -> send
/// POST /{user_id}/read   -> mark_thread_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(message::inbox))
        .route("/unread-count", get(message::unread_count))
        .route("/{user_id}", get(message::thread).post(message::send))
        .route("/{user_id}/read", post(message::mark_thread_read))
}
