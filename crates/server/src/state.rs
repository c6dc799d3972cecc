use sea_orm::DatabaseConnection;

use service::auth::token::TokenConfig;

/// Shared application state; cheap to clone per request.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub tokens: TokenConfig,
}
