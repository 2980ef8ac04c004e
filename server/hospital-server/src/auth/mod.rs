//! Credential issuance and verification

pub mod tokens;

pub use tokens::{TokenClaims, TokenError, TokenService};
