use crate::error::{ConfigError, Result};
use crate::settings::{Settings, DEFAULT_JWT_SECRET, MAX_TOKEN_TTL_HOURS};

/// Reject settings the server cannot start with
pub fn validate(settings: &Settings) -> Result<()> {
    if settings.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must be non-zero".to_string(),
        ));
    }

    if settings.auth.jwt_secret.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.jwt_secret must not be empty".to_string(),
        ));
    }

    if !(1..=MAX_TOKEN_TTL_HOURS).contains(&settings.auth.token_ttl_hours) {
        return Err(ConfigError::ValidationError(format!(
            "auth.token_ttl_hours must be between 1 and {MAX_TOKEN_TTL_HOURS}"
        )));
    }

    if let Some(url) = &settings.database.url {
        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(ConfigError::ValidationError(
                "database.url must be a postgres:// connection string".to_string(),
            ));
        }
    }

    if settings.auth.jwt_secret == DEFAULT_JWT_SECRET {
        tracing::warn!("auth.jwt_secret is the built-in default; set HOSPITAL__AUTH__JWT_SECRET");
    }

    Ok(())
}
