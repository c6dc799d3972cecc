//! Patient workflows: CRUD plus fuzzy search; creation and update validate
//! the referenced doctor.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::PatientService;
