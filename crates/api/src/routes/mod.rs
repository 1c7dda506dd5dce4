pub mod application;
pub mod auth;
pub mod health;
pub mod message;
pub mod project;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                    WebSocket (token query param)
///
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
///
/// /projects                              list (public), create
/// /projects/{id}                         get (vault gated), update, delete
/// /projects/{project_id}/applications    submit application
///
/// /applications/incoming                 applications to my projects
/// /applications/outgoing                 applications I submitted
/// /applications/{id}/decision            approve / reject (owner only)
///
/// /messages                              inbox (one entry per counterparty)
/// /messages/unread-count                 unread badge count
/// /messages/{user_id}                    thread (GET), send (POST)
/// /messages/{user_id}/read               mark thread read
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint for realtime delivery.
        .route("/ws", get(ws::ws_handler))
        // Authentication routes (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // Project routes (also nests application submission).
        .nest("/projects", project::router())
        // Two-sided application dashboard and decisions.
        .nest("/applications", application::router())
        // Conversations: inbox, threads, sends, read flags.
        .nest("/messages", message::router())
}
