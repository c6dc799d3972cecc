//! Admin workflows: CRUD over administrator accounts, keyed by username.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::AdminService;
