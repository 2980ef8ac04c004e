use auth_identity::IdentityError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),
}

impl DatabaseError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound { .. })
    }
}

impl From<DatabaseError> for IdentityError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound { .. } => IdentityError::UserNotFound,
            other => IdentityError::Storage(other.to_string()),
        }
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
