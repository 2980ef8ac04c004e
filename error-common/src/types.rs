use thiserror::Error;

/// Process-level error for startup, configuration and serving
#[derive(Error, Debug)]
pub enum HospitalError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Store operation errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HospitalError {
    /// Structured code for this error category
    pub fn code(&self) -> &'static str {
        match self {
            HospitalError::NetworkError(_) | HospitalError::ServerError(_) => {
                crate::codes::system::SERVER_FAILURE
            }
            HospitalError::DatabaseError(_) => crate::codes::database::QUERY_FAILED,
            HospitalError::ConfigError(_) => crate::codes::system::CONFIGURATION,
            HospitalError::InternalError(_) | HospitalError::Other(_) => {
                crate::codes::system::INTERNAL
            }
        }
    }
}

/// Result type alias for hospital engine operations
pub type Result<T> = std::result::Result<T, HospitalError>;

/// Async logging function for errors
pub async fn log_error(context: &str, error: &HospitalError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error = %error,
        "Hospital engine error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_carry_configuration_code() {
        let err = HospitalError::ConfigError("missing jwt secret".to_string());
        assert_eq!(err.code(), "SYS_5002");
        assert_eq!(err.to_string(), "Configuration error: missing jwt secret");
    }

    #[test]
    fn startup_failures_map_to_their_codes() {
        let cases = [
            (HospitalError::NetworkError("bind".into()), "SYS_5001"),
            (HospitalError::ServerError("serve".into()), "SYS_5001"),
            (HospitalError::DatabaseError("connect".into()), "DB_4002"),
            (HospitalError::InternalError("logger".into()), "SYS_5003"),
        ];
        for (err, code) in cases {
            assert_eq!(err.code(), code, "{err}");
        }
    }

    #[test]
    fn anyhow_errors_are_wrapped_transparently() {
        let err: HospitalError = anyhow::anyhow!("socket closed").into();
        assert_eq!(err.to_string(), "socket closed");
        assert_eq!(err.code(), "SYS_5003");
    }
}
