use crate::types::DbId;

/// Domain error taxonomy.
///
/// Every fallible operation in the engine surfaces one of these variants to
/// the caller as a structured result; nothing is retried or swallowed. The
/// API layer maps each variant onto an HTTP status and stable error code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An application for this (project, applicant) pair already exists.
    #[error("An application for this project already exists")]
    DuplicateApplication,

    /// The application has already reached a terminal decision.
    #[error("Application has already been decided")]
    AlreadyDecided,

    /// The project is completed or closed and does not accept applications.
    #[error("Project is not accepting applications")]
    ProjectNotAcceptingApplications,

    /// A message body was empty or whitespace-only.
    #[error("Message body must not be empty")]
    EmptyMessage,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
