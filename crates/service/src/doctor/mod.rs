//! Doctor workflows: CRUD, IIN lookup, fuzzy search, and the list of
//! patients assigned to one doctor.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::DoctorService;
