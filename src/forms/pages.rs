use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::page::NewPage;
use crate::domain::types::{CategoryId, PageTitle, PageUrl, TypeConstraintError, ViewCount};

/// Prefixes scheme-less input such as `www.example.com` with `http://`.
fn normalize_page_url(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

#[derive(Deserialize, Validate)]
pub struct AddPageForm {
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddPageFormPayload {
    pub title: PageTitle,
    pub url: PageUrl,
}

impl AddPageFormPayload {
    /// New pages always start unviewed.
    pub fn into_new_page(self, category_id: CategoryId) -> NewPage {
        NewPage {
            category_id,
            title: self.title,
            url: self.url,
            views: ViewCount::zero(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AddPageFormError {
    #[error("Add page form validation failed: {0}")]
    Validation(String),
    #[error("Add page form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddPageFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddPageFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddPageForm> for AddPageFormPayload {
    type Error = AddPageFormError;

    fn try_from(value: AddPageForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            title: PageTitle::new(value.title)?,
            url: PageUrl::new(normalize_page_url(&value.url))?,
        })
    }
}
