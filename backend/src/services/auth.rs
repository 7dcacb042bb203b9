//! Password hashing and bearer token issuance.
//!
//! Passwords are stored as Argon2id encoded strings (salt and parameters
//! embedded). Tokens are HS256 JWTs signed with the configured secret.

use argon2::{Config, Variant};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{thread_rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::{User, UserId};

const SALT_LEN: usize = 16;

/// Errors raised while hashing passwords or handling tokens.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid token lifetime: {0} hours")]
    InvalidTtl(i64),
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut salt = [0u8; SALT_LEN];
    thread_rng().fill_bytes(&mut salt);
    let config = Config {
        variant: Variant::Argon2id,
        mem_cost: 19 * 1024,
        time_cost: 2,
        lanes: 1,
        ..Config::default()
    };
    argon2::hash_encoded(password.as_bytes(), &salt, &config)
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check `password` against an encoded hash. Malformed hashes never match.
pub fn verify_password(encoded: &str, password: &str) -> bool {
    argon2::verify_encoded(encoded, password.as_bytes()).unwrap_or(false)
}

/// JWT payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub username: String,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
    /// Unique token id.
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }
}

/// Issues and verifies HS256 tokens for a single secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// `ttl_hours` must be positive and representable as a duration.
    pub fn new(secret: &str, ttl_hours: i64) -> Result<Self, AuthError> {
        let ttl = Duration::try_hours(ttl_hours)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or(AuthError::InvalidTtl(ttl_hours))?;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        })
    }

    /// Issue a token for `user` valid from now.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token for `user` as if it were `now`.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, AuthError> {
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::Signing("token expiry out of range".to_string()))?;
        let claims = Claims {
            sub: user.id.value(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Validate signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_hours", &self.ttl.num_hours())
            .finish_non_exhaustive()
    }
}
