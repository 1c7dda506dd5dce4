//! Repository for the `project_applications` table.
//!
//! The two mutation paths encode the state machine at the store level:
//! inserts ride on the (project, applicant) unique constraint, and the
//! decision update is conditional on `status = 'pending'` so a concurrent
//! second decision affects zero rows instead of overwriting the first.

use sqlx::PgPool;
use codabrate_core::types::DbId;

use crate::models::application::{Application, ApplicationWithContext, CreateApplication};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, applicant_id, status, message, created_at, decided_at";

/// Column list for dashboard queries (aliased to the `a` table).
const JOINED_COLUMNS: &str = "a.id, a.project_id, a.applicant_id, a.status, a.message, \
                               a.created_at, a.decided_at, \
                               p.title AS project_title, \
                               u.username AS applicant_username, \
                               u.university AS applicant_university";

/// Provides operations on the application lifecycle.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a pending application.
    ///
    /// Returns `None` when an application for this (project, applicant)
    /// pair already exists -- the insert is a no-op on conflict, so the
    /// first row always survives a duplicate submission race.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_applications (project_id, applicant_id, message)
             VALUES ($1, $2, $3)
             ON CONFLICT (project_id, applicant_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(input.project_id)
            .bind(input.applicant_id)
            .bind(&input.message)
            .fetch_optional(pool)
            .await
    }

    /// Find an application by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The stored status of a (project, applicant) application, if any.
    pub async fn status_for(
        pool: &PgPool,
        project_id: DbId,
        applicant_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT status FROM project_applications \
             WHERE project_id = $1 AND applicant_id = $2",
        )
        .bind(project_id)
        .bind(applicant_id)
        .fetch_optional(pool)
        .await
    }

    /// Record a terminal decision on a pending application.
    ///
    /// The update only fires while the row is still `pending`; a second
    /// decision (double click, second tab) affects zero rows and returns
    /// `None`, which callers surface as `AlreadyDecided`. The winning status
    /// persists untouched.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        decision: &str,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE project_applications \
             SET status = $2, decided_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(decision)
            .fetch_optional(pool)
            .await
    }

    /// Outgoing side of the dashboard: everything the user applied to,
    /// newest first.
    pub async fn list_for_applicant(
        pool: &PgPool,
        applicant_id: DbId,
    ) -> Result<Vec<ApplicationWithContext>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM project_applications a \
             JOIN projects p ON p.id = a.project_id \
             JOIN users u ON u.id = a.applicant_id \
             WHERE a.applicant_id = $1 \
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, ApplicationWithContext>(&query)
            .bind(applicant_id)
            .fetch_all(pool)
            .await
    }

    /// Incoming side of the dashboard: every application against any of the
    /// owner's projects, newest first.
    pub async fn list_incoming_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<ApplicationWithContext>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM project_applications a \
             JOIN projects p ON p.id = a.project_id \
             JOIN users u ON u.id = a.applicant_id \
             WHERE p.owner_id = $1 \
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, ApplicationWithContext>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }
}
