//! Project entity models and DTOs.
//!
//! The public listing row and the private vault detail are separate types
//! mirroring the table split: [`Project`] never carries `safe_details`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use codabrate_core::types::{DbId, Timestamp};

/// A public project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub showcase_description: String,
    pub category_tags: Vec<String>,
    pub status: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project row joined with its owner's public identity, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithOwner {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub showcase_description: String,
    pub category_tags: Vec<String>,
    pub status: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_username: String,
    pub owner_university: Option<String>,
}

/// DTO for creating a new project. `safe_details` is written to the vault
/// table, never to `projects`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub showcase_description: String,
    pub safe_details: Option<String>,
    pub category_tags: Option<Vec<String>>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub showcase_description: Option<String>,
    pub safe_details: Option<String>,
    pub category_tags: Option<Vec<String>>,
    pub status: Option<String>,
}
