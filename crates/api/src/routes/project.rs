//! Route definitions for the `/projects` resource.
//!
//! Also nests application submission under `/projects/{project_id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{application, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id (vault gated)
/// PUT    /{id}                              -> update (owner only)
/// DELETE /{id}                              -> delete (owner only)
///
/// POST   /{project_id}/applications         -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{project_id}/applications", post(application::submit))
}
