//! Request validation utilities for consistent validation across handlers
//!
//! This module provides a `RequestValidation` trait and helper macros to
//! centralize validation logic and ensure consistent error messages.

use crate::error::ApiError;

/// Trait for validating request payloads
///
/// Implement this trait for create/update request types so handlers can
/// reject bad input before touching the store.
pub trait RequestValidation {
    /// Returns `Err(ApiError::Validation)` describing the first failure
    fn validate(&self) -> Result<(), ApiError>;
}

/// Macro for validating fields with custom predicates
///
/// # Usage
///
/// ```rust,ignore
/// validate_field!(self.age, self.age >= 0, "Age cannot be negative");
/// ```
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Macro for validating required fields (non-blank strings)
///
/// # Usage
///
/// ```rust,ignore
/// validate_required!(self.name, "Name is required");
/// ```
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        $crate::validate_field!($field, !$field.trim().is_empty(), $message);
    };
}

/// Macro for validating optional fields that, when present, must not be blank
#[macro_export]
macro_rules! validate_not_blank {
    ($field:expr, $message:expr) => {
        $crate::validate_field!(
            $field,
            $field.as_deref().map_or(true, |v: &str| !v.trim().is_empty()),
            $message
        );
    };
}

/// Macro for validating numeric ranges (inclusive)
///
/// # Usage
///
/// ```rust,ignore
/// validate_range!(self.age, 0, 120, "Age must be between 0 and 120");
/// ```
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        $crate::validate_field!($field, ($min..=$max).contains(&$field), $message);
    };
}
