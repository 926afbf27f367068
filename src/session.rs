//! Cookie session glue: visit state storage and the logged-in user extractor.

use std::future::{Ready, ready};

use actix_identity::{Identity, IdentityExt};
use actix_session::{Session, SessionExt};
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use chrono::NaiveDateTime;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{UserId, Username};
use crate::domain::visit::{LAST_VISIT_KEY, VISITS_KEY, VisitState};
use crate::services::visits::VisitStore;

/// Session key holding the username of the logged-in user.
pub const USERNAME_KEY: &str = "username";

impl VisitStore for Session {
    type Error = actix_web::Error;

    fn stored_visits(&self) -> Result<Option<u32>, Self::Error> {
        Ok(self.get::<u32>(VISITS_KEY)?)
    }

    fn stored_last_visit(&self) -> Result<Option<NaiveDateTime>, Self::Error> {
        Ok(self.get::<NaiveDateTime>(LAST_VISIT_KEY)?)
    }

    fn save_visit_state(&self, state: &VisitState) -> Result<(), Self::Error> {
        self.insert(VISITS_KEY, state.visits.get())?;
        self.insert(LAST_VISIT_KEY, state.last_visit)?;
        Ok(())
    }
}

fn authenticated_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let identity = req.get_identity().map_err(ErrorUnauthorized)?;
    let id = identity.id().map_err(ErrorUnauthorized)?;
    let id = id
        .parse::<i32>()
        .map_err(ErrorUnauthorized)
        .and_then(|id| UserId::new(id).map_err(ErrorUnauthorized))?;

    let username = req
        .get_session()
        .get::<String>(USERNAME_KEY)?
        .ok_or_else(|| ErrorUnauthorized("session has no username"))?;
    let username = Username::new(username).map_err(ErrorUnauthorized)?;

    Ok(AuthenticatedUser { id, username })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticated_user(req))
    }
}

/// Attach `user` to the current session.
pub fn start_session(
    req: &HttpRequest,
    session: &Session,
    user: &AuthenticatedUser,
) -> Result<(), actix_web::Error> {
    Identity::login(&req.extensions(), user.id.to_string())?;
    session.insert(USERNAME_KEY, user.username.as_str())?;
    Ok(())
}

/// Forget the logged-in user.
pub fn end_session(identity: Identity, session: &Session) {
    identity.logout();
    session.remove(USERNAME_KEY);
}
