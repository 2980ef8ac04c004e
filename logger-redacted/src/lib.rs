//! Tracing setup and PII redaction for the hospital engine
//!
//! Store and identity errors can carry patient emails or phone numbers in
//! their detail (constraint names, duplicate-key values). Anything logged
//! from an error path goes through [`redact`] first, which replaces those
//! values with a short correlation hash.
//!
//! # Example
//!
//! ```rust
//! use logger_redacted::{PiiRedactor, RedactionConfig};
//!
//! let redactor = PiiRedactor::new(RedactionConfig {
//!     hash_for_correlation: false,
//!     ..Default::default()
//! });
//! let line = redactor.redact("duplicate key: jane@example.com");
//! assert_eq!(line, "duplicate key: j***@e***");
//! ```

pub mod config;
pub mod redactor;

pub use config::*;
pub use redactor::*;

use std::sync::atomic::{AtomicBool, Ordering};

use lazy_static::lazy_static;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

lazy_static! {
    static ref DEFAULT_REDACTOR: PiiRedactor = PiiRedactor::default();
}

static REDACTION_ENABLED: AtomicBool = AtomicBool::new(true);

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Tracing subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.level`; `verbose` bumps the default to debug.
pub fn init(config: &LoggerConfig, verbose: bool) -> Result<(), LoggerError> {
    REDACTION_ENABLED.store(config.redact_pii, Ordering::Relaxed);

    let level = if verbose { "debug" } else { config.level.as_str() };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "hospital_server={level},database_layer={level},auth_identity={level},tower_http=info,sqlx=warn"
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.json {
        registry
            .with(fmt::layer().with_target(false).with_ansi(false).json())
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };

    result.map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

/// Redact PII from a message with the default redactor, if redaction is on.
pub fn redact(text: &str) -> String {
    if REDACTION_ENABLED.load(Ordering::Relaxed) {
        DEFAULT_REDACTOR.redact(text)
    } else {
        text.to_string()
    }
}
