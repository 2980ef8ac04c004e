// Logger configuration
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Emit one JSON object per event instead of human-readable lines
    pub json: bool,
    /// Default filter level when `RUST_LOG` is not set
    pub level: String,
    /// Redact emails and phone numbers from logged error detail
    pub redact_pii: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            json: false,
            level: "info".to_string(),
            redact_pii: true,
        }
    }
}
