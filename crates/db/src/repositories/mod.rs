//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and return `sqlx::Error` unchanged.

pub mod role_repo;
pub mod slot_overview_repo;
pub mod user_repo;

pub use role_repo::RoleRepo;
pub use slot_overview_repo::SlotOverviewRepo;
pub use user_repo::UserRepo;
