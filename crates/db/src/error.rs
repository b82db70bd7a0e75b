//! Classification of database failures.
//!
//! Repositories return `sqlx::Error` unchanged. Callers that need to branch
//! on the failure category (conflict vs. bad reference vs. outage) use
//! [`classify`] instead of matching SQLSTATE codes themselves.

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Category of a failed database operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbErrorKind {
    /// A unique constraint rejected the write (e.g. duplicate `role_name`).
    UniqueViolation { constraint: String },
    /// A foreign key rejected the write (e.g. unknown `role_id`).
    ForeignKeyViolation { constraint: String },
    /// A query that required a row found none.
    NotFound,
    /// Connectivity, timeout, missing relation, decode failure, etc.
    DataAccess,
}

/// Map a `sqlx::Error` onto a [`DbErrorKind`].
pub fn classify(err: &sqlx::Error) -> DbErrorKind {
    match err {
        sqlx::Error::RowNotFound => DbErrorKind::NotFound,
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => DbErrorKind::UniqueViolation { constraint },
                Some(FOREIGN_KEY_VIOLATION) => DbErrorKind::ForeignKeyViolation { constraint },
                _ => DbErrorKind::DataAccess,
            }
        }
        _ => DbErrorKind::DataAccess,
    }
}
