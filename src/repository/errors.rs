use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Errors returned by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique or foreign key constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,
    /// A stored value does not satisfy the domain constraints.
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("database error: {0}")]
    Database(DieselError),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => RepositoryError::ConstraintViolation(info.message().to_string()),
            other => RepositoryError::Database(other),
        }
    }
}

/// Convenient alias for repository results.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
