use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::AuthError;

/// Principal role carried in the token `role` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    /// Every authenticated role; used for endpoints open to any valid token.
    pub const ANY: [Role; 3] = [Role::Patient, Role::Doctor, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Doctor => "Doctor",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Patient" => Ok(Role::Patient),
            "Doctor" => Ok(Role::Doctor),
            "Admin" => Ok(Role::Admin),
            other => Err(format!("invalid user role: {other}")),
        }
    }
}

/// Login input: natural key (IIN or username), raw password, requested role.
/// The role stays a free string here so an unknown value surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Issued access/refresh pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: String,
}

/// JWT claims: subject (IIN or username), role, expiry as unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    pub fn role(&self) -> Result<Role, AuthError> {
        self.role
            .parse()
            .map_err(|_| AuthError::TokenInvalid("unknown role claim".into()))
    }
}

/// Stored credential view used for password verification.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub subject: String,
    pub password_hash: String,
}
