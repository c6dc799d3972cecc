//! HTTP layer: router, claims extraction, and the error-to-status mapping.

pub mod errors;
pub mod extract;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run;
