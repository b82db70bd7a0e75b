//! Shared types for the parking backend.

pub mod types;
