use serde::Serialize;

/// Health-check payload for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
}
