//! Authentication context extraction
//!
//! Handlers that take an [`AuthContext`] only run for requests carrying a
//! valid bearer token; everything else is answered with 401.

use async_trait::async_trait;
use auth_identity::Actor;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header::AUTHORIZATION, request::Parts};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::TokenService;
use crate::error::ApiError;

/// Authenticated caller, extracted per request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub actor: Actor,
    /// Request ID from `X-Request-ID`, or generated
    pub request_id: String,
}

impl AuthContext {
    pub fn user_id(&self) -> Uuid {
        self.actor.id
    }
}

/// Extract the bearer token from the Authorization header
fn extract_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::authentication("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::authentication("Invalid Authorization header format. Expected: Bearer <token>")
        })
}

fn request_id(parts: &Parts) -> String {
    parts
        .headers
        .get("x-request-id")
        .and_then(|h| h.to_str().ok())
        .map(ToString::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
    Arc<TokenService>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenService>::from_ref(state);

        let token = extract_token(parts)?;
        let claims = tokens.validate(token)?;
        let actor = claims.actor()?;

        Ok(AuthContext {
            actor,
            request_id: request_id(parts),
        })
    }
}
