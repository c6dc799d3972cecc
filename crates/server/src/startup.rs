use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::auth::token::TokenConfig;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks.
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Pool options come from the `[database]` section when a config file is
/// present; otherwise fall back to the plain DATABASE_URL connection.
async fn connect_db() -> Result<DatabaseConnection, StartupError> {
    match configs::load_default() {
        Ok(cfg) => {
            let mut db = cfg.database;
            db.normalize_from_env();
            db.validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
            models::db::connect_with_config(&db).await.map_err(StartupError::Any)
        }
        Err(_) => models::db::connect().await.map_err(StartupError::Any),
    }
}

/// Token settings from config.toml when present, otherwise env with a dev
/// fallback secret.
fn load_token_config() -> TokenConfig {
    let mut auth = match configs::load_default() {
        Ok(cfg) => cfg.auth,
        Err(_) => configs::AuthConfig::default(),
    };
    auth.normalize_from_env();
    if auth.jwt_secret.trim().is_empty() {
        auth.jwt_secret = "dev-secret-change-me".to_string();
    }
    TokenConfig::from_settings(&auth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_database_config_fails_fast() {
        let path = std::env::temp_dir().join("medrecords-bad-db-config.toml");
        std::fs::write(
            &path,
            "[server]\nhost = \"127.0.0.1\"\nport = 8080\n\n[database]\nurl = \"mysql://nope\"\n",
        )
        .unwrap();
        std::env::set_var("CONFIG_PATH", &path);
        let err = connect_db().await.unwrap_err();
        std::env::remove_var("CONFIG_PATH");
        assert!(matches!(err, StartupError::InvalidConfig(_)));
    }
}

/// Public entry: build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let db = connect_db().await?;
    let state = ServerState { db, tokens: load_token_config() };

    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    let addr = load_bind_addr()?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
