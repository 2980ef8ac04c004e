use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};

/// Secret shipped in the defaults; startup warns when it is still in use
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub appointments: AppointmentSettings,
    pub logging: LoggerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Per-request timeout enforced by the HTTP layer
    pub request_timeout_secs: u64,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout_secs: 30,
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// PostgreSQL connection string; the in-memory store is used when unset
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 20,
            run_migrations: true,
        }
    }
}

/// Longest token lifetime accepted from configuration (one year)
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub issuer: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_hours: 24,
            issuer: "hospital-engine".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentSettings {
    /// Only the booked patient or the assigned doctor may update or delete
    pub enforce_ownership: bool,
}

impl Default for AppointmentSettings {
    fn default() -> Self {
        Self {
            enforce_ownership: true,
        }
    }
}
