//! User entity model and DTOs.

use parking_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `parking.users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// The role is referenced by id only; resolve it with
/// [`UserRepo::find_role`](crate::repositories::UserRepo::find_role).
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a new user.
///
/// `password_hash` must already be hashed by the caller.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}
