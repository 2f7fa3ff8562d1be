//! Bearer token issuance and verification for the administrator login.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Lifetime of an issued token.
pub const TOKEN_TTL_SECS: i64 = 3600;

const BEARER_PREFIX: &str = "Bearer ";

/// JWT claims carried by an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the administrator email).
    pub sub: String,
    /// Administrator email, kept alongside `sub` for older clients.
    pub email: String,
    /// Issued at time (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issuer.
    pub iss: String,
}

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("missing")]
    Missing,
    #[error("malformed")]
    Malformed,
    #[error("expired")]
    Expired,
    #[error("signature-mismatch")]
    SignatureMismatch,
}

/// The single administrator identity, built once from configuration.
#[derive(Clone)]
pub struct AdminCredential {
    email: String,
    /// Password digest (SHA256 hex).
    password_hash: String,
}

impl AdminCredential {
    pub fn new(email: impl Into<String>, password: &str) -> Self {
        Self {
            email: email.into(),
            password_hash: hash_password(password),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Check both fields; the caller cannot tell which one failed.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        let email_ok = email == self.email;
        let password_ok = hash_password(password) == self.password_hash;
        email_ok & password_ok
    }
}

fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub subject: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies administrator bearer tokens.
///
/// Holds no session state: verification is a function of the token, the
/// signing secret and the clock.
#[derive(Clone)]
pub struct CredentialVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    admin: AdminCredential,
}

impl CredentialVerifier {
    /// Create a new verifier with the given secret and admin identity.
    pub fn new(secret: &str, issuer: impl Into<String>, admin: AdminCredential) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            admin,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
            AdminCredential::new(config.admin_email.clone(), &config.admin_password),
        )
    }

    /// Token validity duration in seconds.
    pub fn token_ttl_secs(&self) -> i64 {
        TOKEN_TTL_SECS
    }

    /// Exchange the admin email and password for a token.
    pub fn issue(&self, email: &str, password: &str) -> AppResult<IssuedToken> {
        self.issue_at(email, password, Utc::now())
    }

    /// [`CredentialVerifier::issue`] with an explicit issuance instant.
    pub fn issue_at(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> AppResult<IssuedToken> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::BadRequest(
                "please enter email and password".to_string(),
            ));
        }

        if !self.admin.matches(email, password) {
            return Err(AppError::Unauthorized("wrong email or password".to_string()));
        }

        let expires_at = now + Duration::seconds(TOKEN_TTL_SECS);
        let claims = Claims {
            sub: email.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))?;

        Ok(IssuedToken {
            token,
            subject: claims.sub,
            expires_at,
        })
    }

    /// Verify the value of an `Authorization` header, returning the subject.
    pub fn verify(&self, authorization: Option<&str>) -> Result<String, InvalidReason> {
        self.verify_at(authorization, Utc::now())
    }

    /// [`CredentialVerifier::verify`] against an explicit clock reading.
    pub fn verify_at(
        &self,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, InvalidReason> {
        let token = bearer_token(authorization).ok_or(InvalidReason::Missing)?;
        let claims = self.decode_claims(token)?;

        if claims.sub != self.admin.email() {
            return Err(InvalidReason::SignatureMismatch);
        }
        if now.timestamp() >= claims.exp {
            return Err(InvalidReason::Expired);
        }

        Ok(claims.sub)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, InvalidReason> {
        // Expiry is checked by the caller against its own clock reading.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "JWT validation failed");
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidIssuer => {
                        InvalidReason::SignatureMismatch
                    }
                    ErrorKind::ExpiredSignature => InvalidReason::Expired,
                    _ => InvalidReason::Malformed,
                }
            })
    }
}

/// Pull the token out of `Bearer <token>`; anything else counts as absent.
pub fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    authorization
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
}
