//! SeaORM entities for the medical records store: `patient`, `doctor`, `admin`.
//! Field-level validation lives in [`validate`]; connection helpers in [`db`].

pub mod db;
pub mod errors;

pub mod admin;
pub mod doctor;
pub mod enums;
pub mod patient;
pub mod validate;
