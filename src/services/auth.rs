use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::Utc;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::user::NewUser;
use crate::forms::auth::{LoginFormPayload, RegisterFormPayload};
use crate::repository::{RepositoryError, UserReader, UserWriter};

use super::{ServiceError, ServiceResult};

const INVALID_LOGIN: &str = "Invalid login details supplied.";

/// Hash a password into an argon2 PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check `password` against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

pub fn register<R>(payload: RegisterFormPayload, repo: &R) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader + UserWriter,
{
    match repo.get_user_by_username(&payload.username) {
        Ok(None) => {}
        Ok(Some(_)) => {
            return Err(ServiceError::Conflict(format!(
                "Username '{}' is already taken.",
                payload.username
            )));
        }
        Err(e) => {
            log::error!("Failed to look up user: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        log::error!("Failed to hash password: {e}");
        ServiceError::Internal
    })?;

    let new_user = NewUser {
        username: payload.username,
        email: payload.email,
        password_hash,
        created_at: Utc::now().naive_utc(),
    };

    match repo.create_user(&new_user) {
        Ok(user) => {
            log::info!("Registered user {}", user.username);
            Ok(AuthenticatedUser::from(&user))
        }
        Err(RepositoryError::ConstraintViolation(_)) => Err(ServiceError::Conflict(format!(
            "Username '{}' is already taken.",
            new_user.username
        ))),
        Err(e) => {
            log::error!("Failed to create user: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Verifies credentials. Unknown users and wrong passwords are
/// indistinguishable to the caller.
pub fn login<R>(payload: LoginFormPayload, repo: &R) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader,
{
    let user = match repo.get_user_by_username(&payload.username) {
        Ok(Some(user)) => user,
        Ok(None) => {
            log::warn!("Login attempt for unknown user {}", payload.username);
            return Err(ServiceError::Form(INVALID_LOGIN.to_string()));
        }
        Err(e) => {
            log::error!("Failed to look up user: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        log::warn!("Invalid password for user {}", user.username);
        return Err(ServiceError::Form(INVALID_LOGIN.to_string()));
    }

    Ok(AuthenticatedUser::from(&user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Email, Username};
    use crate::repository::test::TestRepository;

    fn register_payload(username: &str) -> RegisterFormPayload {
        RegisterFormPayload {
            username: Username::new(username).unwrap(),
            email: Email::new("leif@example.com").unwrap(),
            password: "correct horse".to_string(),
        }
    }

    fn login_payload(username: &str, password: &str) -> LoginFormPayload {
        LoginFormPayload {
            username: Username::new(username).unwrap(),
            password: password.to_string(),
        }
    }

    #[test]
    fn hashes_verify_only_their_password() {
        let hash = hash_password("correct horse").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
        assert!(!verify_password("correct horse", "not a hash"));
    }

    #[test]
    fn registered_user_can_log_in() {
        let repo = TestRepository::default();

        let registered = register(register_payload("leif"), &repo).unwrap();
        let logged_in = login(login_payload("leif", "correct horse"), &repo).unwrap();

        assert_eq!(registered, logged_in);
    }

    #[test]
    fn wrong_password_is_rejected() {
        let repo = TestRepository::default();
        register(register_payload("leif"), &repo).unwrap();

        let err = login(login_payload("leif", "battery staple"), &repo).unwrap_err();

        assert_eq!(err, ServiceError::Form(INVALID_LOGIN.to_string()));
    }

    #[test]
    fn unknown_user_is_rejected() {
        let repo = TestRepository::default();

        let err = login(login_payload("nobody", "correct horse"), &repo).unwrap_err();

        assert_eq!(err, ServiceError::Form(INVALID_LOGIN.to_string()));
    }

    #[test]
    fn duplicate_username_is_a_conflict() {
        let repo = TestRepository::default();
        register(register_payload("leif"), &repo).unwrap();

        let err = register(register_payload("leif"), &repo).unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}
