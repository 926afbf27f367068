use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{Email, TypeConstraintError, Username};

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub password_confirm: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterFormPayload {
    pub username: Username,
    pub email: Email,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum RegisterFormError {
    #[error("Registration form validation failed: {0}")]
    Validation(String),
    #[error("Registration form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for RegisterFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RegisterFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<RegisterForm> for RegisterFormPayload {
    type Error = RegisterFormError;

    fn try_from(value: RegisterForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            username: Username::new(value.username)?,
            email: Email::new(value.email)?,
            password: value.password,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginFormPayload {
    pub username: Username,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("Login form validation failed: {0}")]
    Validation(String),
    #[error("Login form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for LoginFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for LoginFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = LoginFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            username: Username::new(value.username)?,
            password: value.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form(password_confirm: &str) -> RegisterForm {
        RegisterForm {
            username: "leif".to_string(),
            email: "leif@example.com".to_string(),
            password: "correct horse".to_string(),
            password_confirm: password_confirm.to_string(),
        }
    }

    #[test]
    fn register_accepts_matching_passwords() {
        let payload: RegisterFormPayload = register_form("correct horse").try_into().unwrap();
        assert_eq!(payload.username.as_str(), "leif");
        assert_eq!(payload.password, "correct horse");
    }

    #[test]
    fn register_rejects_mismatched_passwords() {
        let payload: Result<RegisterFormPayload, _> = register_form("battery staple").try_into();
        assert!(matches!(payload, Err(RegisterFormError::Validation(_))));
    }

    #[test]
    fn register_rejects_short_passwords() {
        let mut form = register_form("short");
        form.password = "short".to_string();
        let payload: Result<RegisterFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn login_requires_password() {
        let form = LoginForm {
            username: "leif".to_string(),
            password: String::new(),
        };
        let payload: Result<LoginFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }
}
