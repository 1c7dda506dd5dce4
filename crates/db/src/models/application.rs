//! Application entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use codabrate_core::types::{DbId, Timestamp};

/// A row from the `project_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub project_id: DbId,
    pub applicant_id: DbId,
    pub status: String,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub decided_at: Option<Timestamp>,
}

/// An application joined with display context for the two-sided dashboard
/// (project title for outgoing rows, applicant identity for incoming ones).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationWithContext {
    pub id: DbId,
    pub project_id: DbId,
    pub applicant_id: DbId,
    pub status: String,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub decided_at: Option<Timestamp>,
    pub project_title: String,
    pub applicant_username: String,
    pub applicant_university: Option<String>,
}

/// DTO for submitting an application.
#[derive(Debug)]
pub struct CreateApplication {
    pub project_id: DbId,
    pub applicant_id: DbId,
    pub message: Option<String>,
}

/// Request body for deciding an application.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    /// `"approved"` or `"rejected"`.
    pub decision: String,
}
