//! Argon2 password hashing and verification.

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;

use super::errors::AuthError;

/// Hash a raw password with a fresh salt.
pub fn hash_password(raw: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Compare a raw password against a stored hash.
pub fn verify_password(raw: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(raw.as_bytes(), &parsed).is_ok())
}

/// Minimum strength rule shared by every register/update path.
pub fn validate_strength(raw: &str) -> Result<(), AuthError> {
    if raw.len() < 8 {
        return Err(AuthError::Validation("password too short (>=8)".into()));
    }
    Ok(())
}
