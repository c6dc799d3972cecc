//! JWT issue/decode with distinct access and refresh expiries (HS256).

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use super::domain::{Claims, Role, TokenPair};
use super::errors::AuthError;

/// Signing secret and the two token lifetimes.
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, access_minutes: i64, refresh_days: i64) -> Self {
        Self {
            secret: secret.into(),
            access_ttl: Duration::minutes(access_minutes),
            refresh_ttl: Duration::days(refresh_days),
        }
    }

    pub fn from_settings(cfg: &configs::AuthConfig) -> Self {
        Self::new(
            cfg.jwt_secret.clone(),
            cfg.access_token_expire_minutes,
            cfg.refresh_token_expire_days,
        )
    }

    /// Issue a single token with the given lifetime.
    pub fn issue(&self, sub: &str, role: Role, ttl: Duration) -> Result<String, AuthError> {
        let exp = (Utc::now() + ttl).timestamp() as usize;
        let claims = Claims { sub: sub.to_string(), role: role.as_str().to_string(), exp };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Issue the access/refresh pair, each with its own expiry.
    pub fn issue_pair(&self, sub: &str, role: Role) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.issue(sub, role, self.access_ttl)?,
            token_type: "bearer".into(),
            refresh_token: self.issue(sub, role, self.refresh_ttl)?,
        })
    }

    /// Decode a token, verifying signature and expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> TokenConfig {
        TokenConfig::new("test-secret", 15, 30)
    }

    #[test]
    fn issue_and_decode_roundtrip() {
        let cfg = cfg();
        let token = cfg.issue("990101350123", Role::Doctor, cfg.access_ttl).unwrap();
        let claims = cfg.decode(&token).unwrap();
        assert_eq!(claims.sub, "990101350123");
        assert_eq!(claims.role().unwrap(), Role::Doctor);
    }

    #[test]
    fn pair_tokens_both_decode_to_same_subject() {
        let cfg = cfg();
        let pair = cfg.issue_pair("admin01", Role::Admin).unwrap();
        assert_eq!(pair.token_type, "bearer");
        let access = cfg.decode(&pair.access_token).unwrap();
        let refresh = cfg.decode(&pair.refresh_token).unwrap();
        assert_eq!(access.sub, refresh.sub);
        // refresh must outlive access
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn expired_token_rejected() {
        let cfg = cfg();
        // well past the default decode leeway
        let token = cfg.issue("x", Role::Patient, Duration::minutes(-5)).unwrap();
        match cfg.decode(&token) {
            Err(AuthError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {other:?}"),
        }
    }

    #[test]
    fn wrong_secret_rejected() {
        let cfg = cfg();
        let token = cfg.issue("x", Role::Patient, cfg.access_ttl).unwrap();
        let other = TokenConfig::new("other-secret", 15, 30);
        assert!(matches!(other.decode(&token), Err(AuthError::TokenInvalid(_))));
    }

    #[test]
    fn garbage_token_rejected() {
        assert!(matches!(
            cfg().decode("not-a-jwt"),
            Err(AuthError::TokenInvalid(_))
        ));
    }
}
