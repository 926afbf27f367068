//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository error types, so the `From`
//! impls that bridge them live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
