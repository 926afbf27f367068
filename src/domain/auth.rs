use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, Username};
use crate::domain::user::User;

/// The logged-in user attached to a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: Username,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}
