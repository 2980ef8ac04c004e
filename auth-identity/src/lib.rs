//! Identity management and user authentication for the hospital engine
//!
//! This crate provides:
//! - The closed [`Role`] set and the [`Actor`] derived from a credential
//! - User registration and login with Argon2 password hashing
//! - Profile management and the doctor directory
//! - The [`UserRepository`] seam implemented by the storage backends
//!
//! Token issuance lives in the HTTP server; this crate only proves who a
//! user is.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use config::*;
pub use error::*;
pub use models::*;
pub use repository::*;
pub use service::*;
