//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use codabrate_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub university: Option<String>,
    pub department: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash, no email).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub full_name: String,
    pub university: Option<String>,
    pub department: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            full_name: u.full_name,
            university: u.university,
            department: u.department,
            created_at: u.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub university: Option<String>,
    pub department: Option<String>,
}
