//! Handlers for the application lifecycle.
//!
//! Submission and decision are the two mutations of the approval state
//! machine; the dashboard endpoints are its two read sides.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use codabrate_core::application::validate_decision;
use codabrate_core::error::CoreError;
use codabrate_core::project::is_accepting_applications;
use codabrate_core::types::DbId;
use codabrate_db::models::application::{
    Application, ApplicationWithContext, CreateApplication, DecisionRequest,
};
use codabrate_db::repositories::{ApplicationRepo, ProjectRepo};
use codabrate_events::bus::{EVENT_APPLICATION_DECIDED, EVENT_APPLICATION_SUBMITTED};
use codabrate_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{project_id}/applications`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Optional note to the project owner.
    pub message: Option<String>,
}

/// POST /api/v1/projects/{project_id}/applications
///
/// Submit an application to join a project. One application per
/// (project, applicant); owners cannot apply to their own project; closed
/// and completed projects reject submissions outright.
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<SubmitRequest>,
) -> AppResult<(StatusCode, Json<Application>)> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    if project.owner_id == auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot apply to your own project".into(),
        )));
    }

    if !is_accepting_applications(project.status.as_deref()) {
        return Err(AppError::Core(CoreError::ProjectNotAcceptingApplications));
    }

    let application = ApplicationRepo::create(
        &state.pool,
        &CreateApplication {
            project_id,
            applicant_id: auth.user_id,
            message: input.message,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::DuplicateApplication))?;

    tracing::info!(
        user_id = auth.user_id,
        project_id,
        application_id = application.id,
        "Application submitted"
    );

    state.event_bus.publish(
        PlatformEvent::new(EVENT_APPLICATION_SUBMITTED)
            .with_actor(auth.user_id)
            .with_targets([project.owner_id])
            .with_payload(serde_json::json!({ "application": application })),
    );

    Ok((StatusCode::CREATED, Json(application)))
}

/// POST /api/v1/applications/{id}/decision
///
/// Record the owner's decision on a pending application. One-way: once
/// approved or rejected, the status never changes again. A losing
/// concurrent decision observes `ALREADY_DECIDED`.
pub async fn decide(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<Json<Application>> {
    validate_decision(&input.decision)?;

    let application = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;

    let project = ProjectRepo::find_by_id(&state.pool, application.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: application.project_id,
        }))?;

    if project.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner may decide applications".into(),
        )));
    }

    // Conditional update: applies only while the row is still pending.
    let decided = ApplicationRepo::decide(&state.pool, id, &input.decision)
        .await?
        .ok_or(AppError::Core(CoreError::AlreadyDecided))?;

    tracing::info!(
        user_id = auth.user_id,
        application_id = id,
        decision = %decided.status,
        "Application decided"
    );

    state.event_bus.publish(
        PlatformEvent::new(EVENT_APPLICATION_DECIDED)
            .with_actor(auth.user_id)
            .with_targets([decided.applicant_id])
            .with_payload(serde_json::json!({ "application": decided })),
    );

    Ok(Json(decided))
}

/// GET /api/v1/applications/incoming
///
/// Applications received across all of the caller's projects, newest first.
pub async fn list_incoming(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ApplicationWithContext>>>> {
    let applications = ApplicationRepo::list_incoming_for_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// GET /api/v1/applications/outgoing
///
/// Applications the caller submitted, newest first.
pub async fn list_outgoing(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ApplicationWithContext>>>> {
    let applications = ApplicationRepo::list_for_applicant(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: applications }))
}
