//! Role entity model and DTOs.

use parking_core::types::DbId;
use sqlx::FromRow;

/// A role row from the `parking.roles` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Role {
    pub id: DbId,
    pub role_name: String,
    pub role_description: Option<String>,
}

/// DTO for creating a new role.
#[derive(Debug, Clone)]
pub struct CreateRole {
    pub role_name: String,
    pub role_description: Option<String>,
}
