/// JWT token service
///
/// Issues and validates the HS256 bearer tokens that carry an actor's
/// identity between requests.
use auth_identity::{Actor, Role, User};
use chrono::{Duration, Utc};
use config_engine::{AuthSettings, MAX_TOKEN_TTL_HOURS};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;

// =============================================================================
// JWT TOKEN CLAIMS
// =============================================================================

/// JWT token claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,

    /// User role (`doctor` or `patient`)
    pub role: String,

    /// User email
    pub email: String,

    /// Issued at timestamp (seconds since epoch)
    pub iat: i64,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    /// The actor this token speaks for
    pub fn actor(&self) -> Result<Actor, TokenError> {
        let id = Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidSubject)?;
        let role: Role = self
            .role
            .parse()
            .map_err(|_| TokenError::UnknownRole(self.role.clone()))?;
        Ok(Actor { id, role })
    }
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Invalid user ID in token")]
    InvalidSubject,

    #[error("Unknown role in token: {0}")]
    UnknownRole(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Encoding(message) => ApiError::internal(message),
            TokenError::Expired => ApiError::authentication("Token expired"),
            _ => ApiError::authentication("Invalid or expired token"),
        }
    }
}

// =============================================================================
// TOKEN SERVICE
// =============================================================================

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    issuer: String,
}

impl TokenService {
    pub fn new(settings: &AuthSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
            validation,
            // Settings built without the config loader skip its bounds check
            ttl: Duration::hours(settings.token_ttl_hours.clamp(1, MAX_TOKEN_TTL_HOURS)),
            issuer: settings.issuer.clone(),
        }
    }

    /// Issue a signed token for `user`
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.id.to_string(),
            role: user.role.as_str().to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: self.issuer.clone(),
        };
        self.sign(&claims)
    }

    /// Verify signature, expiry and issuer
    pub fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }
}
