use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Hashing error")]
    HashingError,

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, IdentityError>;
