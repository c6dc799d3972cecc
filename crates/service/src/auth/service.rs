use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{LoginInput, Role, TokenPair};
use super::errors::AuthError;
use super::password;
use super::repository::AuthRepository;
use super::token::TokenConfig;

/// Auth business service independent of the web framework.
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    tokens: TokenConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: TokenConfig) -> Self {
        Self { repo, tokens }
    }

    /// Verify credentials for the requested role and issue a token pair.
    #[instrument(skip(self, input), fields(username = %input.username, role = %input.role))]
    pub async fn login(&self, input: LoginInput) -> Result<TokenPair, AuthError> {
        let role: Role = input.role.parse().map_err(AuthError::Validation)?;

        let cred = self
            .repo
            .find_credentials(role, &input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !password::verify_password(&input.password, &cred.password_hash)? {
            debug!("password mismatch");
            return Err(AuthError::Unauthorized);
        }

        let pair = self.tokens.issue_pair(&cred.subject, role)?;
        info!(subject = %cred.subject, role = %role, "login_succeeded");
        Ok(pair)
    }

    /// Re-issue a pair from a valid, unexpired token; sub and role carry over.
    pub fn refresh(&self, token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.tokens.decode(token)?;
        if claims.sub.is_empty() {
            return Err(AuthError::TokenInvalid("missing subject".into()));
        }
        let role = claims.role()?;
        self.tokens.issue_pair(&claims.sub, role)
    }

    pub fn tokens(&self) -> &TokenConfig {
        &self.tokens
    }
}
