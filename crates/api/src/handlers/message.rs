//! Handlers for the `/messages` resource.
//!
//! Messaging is the side effect of approval: a thread only opens between a
//! project owner and an approved applicant, and the authorization predicate
//! runs on every send. Threads are keyed by the pair of users and span all
//! their shared projects.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use codabrate_core::access;
use codabrate_core::conversation::{build_inbox, ConversationMessage};
use codabrate_core::error::CoreError;
use codabrate_core::types::{DbId, Timestamp};
use codabrate_db::models::message::{CreateMessage, Message, SendMessageRequest};
use codabrate_db::models::user::UserResponse;
use codabrate_db::repositories::{ApplicationRepo, MessageRepo, ProjectRepo, UserRepo};
use codabrate_events::bus::EVENT_MESSAGE_SENT;
use codabrate_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One conversation thread: the counterparty, the full message history
/// oldest-first, and the project context the next message will attach to.
#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub counterparty: UserResponse,
    pub messages: Vec<Message>,
    /// Project of the most recent message; `None` for an empty thread.
    pub active_project_id: Option<DbId>,
}

/// One inbox row: the counterparty's identity and the latest message
/// exchanged with them.
#[derive(Debug, Serialize)]
pub struct InboxEntryResponse {
    pub counterparty: UserResponse,
    pub last_message: String,
    pub last_message_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/messages/{user_id}
///
/// Send a message to a counterparty. The project context is the explicit
/// `project_id` hint when given, otherwise the project of the thread's most
/// recent message. The (owner, approved-applicant) pair rule is checked
/// against that project at call time.
pub async fn send(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(receiver_id): Path<DbId>,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let content = input.content.trim();
    if content.is_empty() {
        return Err(AppError::Core(CoreError::EmptyMessage));
    }

    // Resolve the project this message belongs to.
    let project_id = match input.project_id {
        Some(id) => id,
        None => MessageRepo::latest_project_between(&state.pool, auth.user_id, receiver_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "No project context for this conversation; pass project_id".into(),
                ))
            })?,
    };

    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    // The pair must be (owner, approved applicant) on this project.
    let applicant =
        access::conversation_counterparty(project.owner_id, auth.user_id, receiver_id)
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "Conversations are between the project owner and an approved applicant".into(),
                ))
            })?;

    let status = ApplicationRepo::status_for(&state.pool, project_id, applicant).await?;
    if !access::can_open_conversation(
        project.owner_id,
        auth.user_id,
        receiver_id,
        status.as_deref(),
    ) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Messaging unlocks when the application is approved".into(),
        )));
    }

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            project_id,
            sender_id: auth.user_id,
            receiver_id,
            content: content.to_string(),
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        receiver_id,
        project_id,
        message_id = message.id,
        "Message sent"
    );

    // Fan out to both participants. The sender also receives the push (their
    // other tabs need it); clients de-duplicate by message id.
    state.event_bus.publish(
        PlatformEvent::new(EVENT_MESSAGE_SENT)
            .with_actor(auth.user_id)
            .with_targets([message.sender_id, message.receiver_id])
            .with_payload(serde_json::json!({ "message": message })),
    );

    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/v1/messages/{user_id}
///
/// The full thread with a counterparty, oldest first, across all shared
/// projects.
pub async fn thread(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(counterparty_id): Path<DbId>,
) -> AppResult<Json<ThreadResponse>> {
    let counterparty = UserRepo::find_by_id(&state.pool, counterparty_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: counterparty_id,
        }))?;

    let messages = MessageRepo::list_between(&state.pool, auth.user_id, counterparty_id).await?;
    let active_project_id = messages.last().map(|m| m.project_id);

    Ok(Json(ThreadResponse {
        counterparty: counterparty.into(),
        messages,
        active_project_id,
    }))
}

/// POST /api/v1/messages/{user_id}/read
///
/// Mark everything received from the counterparty as read. Returns the
/// number of messages flipped.
pub async fn mark_thread_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(counterparty_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let marked = MessageRepo::mark_thread_read(&state.pool, auth.user_id, counterparty_id).await?;
    Ok(Json(serde_json::json!({
        "data": { "marked_read": marked }
    })))
}

/// GET /api/v1/messages
///
/// The caller's inbox: one entry per counterparty, most recent conversation
/// first.
pub async fn inbox(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<InboxEntryResponse>>>> {
    let rows = MessageRepo::list_all_for_user(&state.pool, auth.user_id).await?;
    let history: Vec<ConversationMessage> = rows.iter().map(Into::into).collect();
    let entries = build_inbox(auth.user_id, &history);

    let counterparties =
        UserRepo::list_public_by_ids(&state.pool, entries.iter().map(|e| e.counterparty_id))
            .await?;

    let inbox = entries
        .into_iter()
        .filter_map(|entry| {
            let counterparty = counterparties
                .iter()
                .find(|u| u.id == entry.counterparty_id)?
                .clone();
            Some(InboxEntryResponse {
                counterparty,
                last_message: entry.last_message,
                last_message_at: entry.last_message_at,
            })
        })
        .collect();

    Ok(Json(DataResponse { data: inbox }))
}

/// GET /api/v1/messages/unread-count
///
/// Number of unread messages waiting for the caller.
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = MessageRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({
        "data": { "count": count }
    })))
}
