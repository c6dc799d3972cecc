//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Centralizes credential verification and the JWT lifecycle (issue,
//! refresh, verify) for all three principal roles.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use service::AuthService;
pub use token::TokenConfig;
