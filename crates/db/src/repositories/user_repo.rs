//! Repository for the `parking.users` table.

use parking_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;
use crate::models::user::{CreateUser, User};
use crate::repositories::RoleRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, role_id, full_name, email, \
                        phone_number, address, created_at, updated_at";

/// Provides insert and lookup operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// `created_at` and `updated_at` are both stamped with the insert time.
    /// Fails with a unique violation on `uq_users_username` for a taken
    /// username, or a foreign key violation on `fk_users_role_id` if
    /// `role_id` does not exist. Nothing is persisted on failure.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO parking.users
                (username, password_hash, role_id, full_name, email, phone_number,
                 address, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parking.users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parking.users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Load the role a user references with a separate lookup.
    ///
    /// Users are never joined to their role implicitly; call this only when
    /// role details are needed.
    pub async fn find_role(pool: &PgPool, user: &User) -> Result<Option<Role>, sqlx::Error> {
        RoleRepo::find_by_id(pool, user.role_id).await
    }
}
