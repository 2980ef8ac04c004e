use auth_identity::IdentityError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use database_layer::DatabaseError;
use error_common::codes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Message returned for every 5xx; the detail only goes to the log
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Error type/code
    pub error_type: String,
    /// Human-readable error message
    pub message: String,
    /// Stable machine-readable code
    pub code: String,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Confirmation body for deletions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Authentication error: {message}")]
    Authentication { message: String },

    #[error("Authorization error: {message}")]
    Authorization { message: String },

    #[error("Resource not found: {resource_type}")]
    NotFound { resource_type: String },

    #[error("Resource conflict: {message}")]
    Conflict { message: String },

    #[error("Database error: {0}")]
    Database(DatabaseError),

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create an authorization error
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Authorization { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::Authentication { .. } => "authentication_error",
            ApiError::Authorization { .. } => "authorization_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Conflict { .. } => "conflict",
            ApiError::Database(_) => "database_error",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => codes::validation::INVALID_INPUT,
            ApiError::Authentication { .. } => codes::authentication::TOKEN_INVALID,
            ApiError::Authorization { .. } => codes::authorization::ACCESS_DENIED,
            ApiError::NotFound { .. } => codes::resource::NOT_FOUND,
            ApiError::Conflict { .. } => codes::resource::CONFLICT,
            ApiError::Database(_) => codes::database::QUERY_FAILED,
            ApiError::Internal { .. } => codes::system::INTERNAL,
        }
    }

    /// The text a client sees
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Validation { message }
            | ApiError::Authentication { message }
            | ApiError::Authorization { message }
            | ApiError::Conflict { message } => message.clone(),
            ApiError::NotFound { resource_type } => format!("{resource_type} not found"),
            ApiError::Database(_) | ApiError::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound { entity, .. } => ApiError::not_found(entity),
            other => ApiError::Database(other),
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::UserNotFound => ApiError::not_found("User"),
            IdentityError::InvalidCredentials => ApiError::authentication(error.to_string()),
            IdentityError::EmailAlreadyInUse => ApiError::conflict(error.to_string()),
            IdentityError::Validation(message) => ApiError::validation(message),
            IdentityError::Forbidden(message) => ApiError::authorization(message),
            IdentityError::HashingError | IdentityError::Storage(_) => {
                ApiError::internal(error.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(format!("Invalid id: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        if status_code.is_server_error() {
            // Store errors can echo user data back; scrub before logging
            let detail = logger_redacted::redact(&self.to_string());
            error!(
                error_id = %error_id,
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                error = %detail,
                "API error occurred"
            );
        } else {
            warn!(
                error_id = %error_id,
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                "Request rejected"
            );
        }

        let error_response = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            message: self.public_message(),
            code: self.code().to_string(),
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_hide_their_detail() {
        let error = ApiError::from(DatabaseError::QueryFailed(
            "duplicate key for jane@example.com".to_string(),
        ));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn missing_rows_become_404() {
        let error = ApiError::from(DatabaseError::NotFound {
            entity: "Appointment",
            id: Uuid::new_v4(),
        });
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.public_message(), "Appointment not found");
    }

    #[test]
    fn identity_errors_map_to_client_statuses() {
        assert_eq!(
            ApiError::from(IdentityError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(IdentityError::EmailAlreadyInUse).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(IdentityError::Forbidden("no".into())).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(IdentityError::Storage("down".into())).public_message(),
            INTERNAL_ERROR_MESSAGE
        );
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let error = ApiError::validation("Missing required fields");
        assert_eq!(error.public_message(), "Missing required fields");
        assert_eq!(error.code(), "VALIDATION_1001");
    }
}
