//! Repository for the `projects` and `project_vault` tables.
//!
//! The vault is deliberately a separate table: nothing here ever joins
//! `safe_details` into a listing query. [`ProjectRepo::fetch_vault`] is the
//! only way to read it, and callers gate that on the access predicates.

use sqlx::PgPool;
use codabrate_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectWithOwner, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, owner_id, title, showcase_description, category_tags, status, created_at, updated_at";

/// Column list for owner-joined listings (aliased to the `p` table).
const JOINED_COLUMNS: &str = "p.id, p.owner_id, p.title, p.showcase_description, \
                               p.category_tags, p.status, p.created_at, p.updated_at, \
                               u.username AS owner_username, u.university AS owner_university";

/// Provides CRUD operations for projects and their vault rows.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project and, when provided, its vault row, in one
    /// transaction. Returns the public row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (owner_id, title, showcase_description, category_tags)
             VALUES ($1, $2, $3, COALESCE($4, '{{}}'))
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.showcase_description)
            .bind(&input.category_tags)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(details) = &input.safe_details {
            sqlx::query("INSERT INTO project_vault (project_id, safe_details) VALUES ($1, $2)")
                .bind(project.id)
                .bind(details)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(project)
    }

    /// Find a public project row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a public project row by ID, joined with the owner's identity.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM projects p \
             JOIN users u ON u.id = p.owner_id \
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProjectWithOwner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, newest first, with owner identity.
    pub async fn list_with_owner(pool: &PgPool) -> Result<Vec<ProjectWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM projects p \
             JOIN users u ON u.id = p.owner_id \
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectWithOwner>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied; a
    /// `safe_details` value upserts the vault row in the same transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                showcase_description = COALESCE($3, showcase_description),
                category_tags = COALESCE($4, category_tags),
                status = COALESCE($5, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.showcase_description)
            .bind(&input.category_tags)
            .bind(&input.status)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(details) = &input.safe_details {
            sqlx::query(
                "INSERT INTO project_vault (project_id, safe_details) VALUES ($1, $2) \
                 ON CONFLICT (project_id) DO UPDATE SET safe_details = EXCLUDED.safe_details",
            )
            .bind(id)
            .bind(details)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Permanently delete a project. The vault row, applications, and
    /// messages cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read the vault detail for a project, if one was written.
    ///
    /// Authorization is the caller's responsibility; every call site checks
    /// `access::can_view_vault` first.
    pub async fn fetch_vault(pool: &PgPool, project_id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT safe_details FROM project_vault WHERE project_id = $1")
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }
}
