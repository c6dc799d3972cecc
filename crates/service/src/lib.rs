//! Business layer providing role-aware CRUD operations on top of models.
//! - Separates business rules (uniqueness, referential checks, password
//!   hashing) from data access behind per-entity repository traits.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;

pub mod auth;

pub mod admin;
pub mod doctor;
pub mod patient;
