//! Route definitions for the `/applications` resource.
//!
//! Submission lives under `/projects/{project_id}/applications`; this
//! router carries the dashboard reads and the decision endpoint.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::application;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET  /incoming        -> list_incoming (owner side)
/// GET  /outgoing        -> list_outgoing (applicant side)
/// POST /{id}/decision   -> decide (owner only, one-shot)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/incoming", get(application::list_incoming))
        .route("/outgoing", get(application::list_outgoing))
        .route("/{id}/decision", post(application::decide))
}
