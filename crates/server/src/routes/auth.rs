use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use service::auth::domain::{LoginInput, TokenPair};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::AuthService;

use crate::errors::ApiError;
use crate::extract::BearerToken;
use crate::state::ServerState;

fn auth_service(state: &ServerState) -> AuthService<SeaOrmAuthRepository> {
    let repo = Arc::new(SeaOrmAuthRepository { db: state.db.clone() });
    AuthService::new(repo, state.tokens.clone())
}

pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<TokenPair>, ApiError> {
    let pair = auth_service(&state).login(input).await?;
    Ok(Json(pair))
}

/// Either half of an issued pair is accepted as long as it is unexpired.
pub async fn refresh(
    State(state): State<ServerState>,
    BearerToken(token): BearerToken,
) -> Result<Json<TokenPair>, ApiError> {
    let pair = auth_service(&state).refresh(&token)?;
    Ok(Json(pair))
}
