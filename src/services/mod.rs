use crate::domain::auth::AuthenticatedUser;

pub mod auth;
pub mod categories;
pub mod errors;
pub mod main;
pub mod pages;
pub mod visits;

pub use errors::{ServiceError, ServiceResult};

/// Rejects anonymous requests for operations that need a login.
pub fn require_user(user: Option<&AuthenticatedUser>) -> ServiceResult<&AuthenticatedUser> {
    user.ok_or(ServiceError::Unauthorized)
}
