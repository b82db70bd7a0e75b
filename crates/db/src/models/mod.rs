//! Row models and DTOs.
//!
//! Entity submodules contain a `FromRow` struct matching the table row and a
//! `Deserialize` create DTO for inserts. `slot_overview` holds the
//! schema-less row type read from the overview view.

pub mod role;
pub mod slot_overview;
pub mod user;
