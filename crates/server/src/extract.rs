use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use service::auth::domain::{Claims, Role};

use crate::errors::ApiError;
use crate::state::ServerState;

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Decoded claims from the `Authorization: Bearer` header. Missing,
/// malformed, or expired tokens reject with 401 before the handler runs.
pub struct AuthClaims(pub Claims);

impl AuthClaims {
    /// 403 unless the token role is in the allow-list.
    pub fn require_any(&self, allowed: &[Role]) -> Result<Role, ApiError> {
        let role = self.0.role().map_err(ApiError::from)?;
        if allowed.contains(&role) {
            Ok(role)
        } else {
            Err(ApiError::forbidden())
        }
    }
}

#[async_trait]
impl FromRequestParts<ServerState> for AuthClaims {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(ApiError::unauthorized)?;
        let claims = state.tokens.decode(token)?;
        Ok(AuthClaims(claims))
    }
}

/// Raw bearer token, undecoded. Refresh accepts either half of a pair and
/// validates it itself.
pub struct BearerToken(pub String);

#[async_trait]
impl FromRequestParts<ServerState> for BearerToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &ServerState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(ApiError::unauthorized)?;
        Ok(BearerToken(token.to_owned()))
    }
}
