//! Configuration management for the hospital engine
//!
//! Settings are assembled from layered sources:
//!
//! - **Defaults**: every field has a built-in value
//! - **Local Files**: an optional YAML file (`hospital.yaml` by default)
//! - **Environment Variables**: `HOSPITAL__<SECTION>__<KEY>`
//!
//! # Example
//!
//! ```rust
//! use config_engine::ConfigEngine;
//!
//! let settings = ConfigEngine::new()
//!     .without_env()
//!     .with_yaml_str("server:\n  port: 9000\n")
//!     .load()
//!     .unwrap();
//! assert_eq!(settings.server.port, 9000);
//! ```

pub mod engine;
pub mod error;
pub mod settings;
pub mod validation;

pub use engine::*;
pub use error::*;
pub use settings::*;
