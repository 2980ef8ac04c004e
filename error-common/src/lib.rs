//! Common error handling utilities for the hospital engine
//!
//! This crate provides the process-level error type and the structured
//! error codes shared by every crate in the workspace.
//!
//! # Error Categories
//!
//! - **DatabaseError**: Store connection and query errors
//! - **ConfigError**: Configuration loading errors
//! - **NetworkError** / **ServerError**: Listener and transport errors
//!
//! # Example
//!
//! ```rust
//! use error_common::{HospitalError, Result};
//!
//! fn parse_port(raw: &str) -> Result<u16> {
//!     raw.parse()
//!         .map_err(|_| HospitalError::ConfigError(format!("invalid port: {raw}")))
//! }
//!
//! assert!(parse_port("8080").is_ok());
//! assert!(parse_port("eighty").is_err());
//! ```

pub mod codes;
pub mod types;

pub use codes::*;
pub use types::*;
