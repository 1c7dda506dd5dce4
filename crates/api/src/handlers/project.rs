//! Handlers for the `/projects` resource.
//!
//! The detail endpoint is where vault gating happens: the public row is
//! served to anyone, and `safe_details` is attached only after
//! `access::can_view_vault` passes for the requester. The check runs on
//! every request; nothing about it is cached.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use codabrate_core::access;
use codabrate_core::error::CoreError;
use codabrate_core::types::DbId;
use codabrate_db::models::project::{CreateProject, Project, ProjectWithOwner, UpdateProject};
use codabrate_db::repositories::{ApplicationRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Project detail response: the public row, plus the vault content when the
/// requester is authorized and the requester's own application status.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectWithOwner,
    /// Present only when the requester may view the vault.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_details: Option<String>,
    /// The requester's application status on this project, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_application_status: Option<String>,
}

/// POST /api/v1/projects
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }

    let project = ProjectRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        project_id = project.id,
        "Project created"
    );

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
///
/// Public showcase listing, newest first. Never touches the vault table.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProjectWithOwner>>> {
    let projects = ProjectRepo::list_with_owner(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
///
/// Showcase for everyone; vault for the owner and approved applicants.
pub async fn get_by_id(
    auth: Option<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = ProjectRepo::find_with_owner(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let mut detail = ProjectDetail {
        safe_details: None,
        my_application_status: None,
        project,
    };

    if let Some(auth) = auth {
        let status = ApplicationRepo::status_for(&state.pool, id, auth.user_id).await?;
        if access::can_view_vault(detail.project.owner_id, auth.user_id, status.as_deref()) {
            detail.safe_details = ProjectRepo::fetch_vault(&state.pool, id).await?;
        }
        detail.my_application_status = status;
    }

    Ok(Json(detail))
}

/// PUT /api/v1/projects/{id}
///
/// Owner-only partial update; a `safe_details` value upserts the vault.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    ensure_owner(&state, id, auth.user_id).await?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Owner-only. Cascades the vault row, applications, and messages.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_owner(&state, id, auth.user_id).await?;

    ProjectRepo::delete(&state.pool, id).await?;
    tracing::info!(user_id = auth.user_id, project_id = id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch a project and verify the acting user owns it.
async fn ensure_owner(state: &AppState, project_id: DbId, user_id: DbId) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    if project.owner_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner may do this".into(),
        )));
    }

    Ok(project)
}
