use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryName, CategorySlug, TypeConstraintError};

#[derive(Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub name: CategoryName,
    pub slug: CategorySlug,
}

impl AddCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory::new(self.name, self.slug)
    }
}

#[derive(Debug, Error)]
pub enum AddCategoryFormError {
    #[error("Add category form validation failed: {0}")]
    Validation(String),
    #[error("Add category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = AddCategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let name = CategoryName::new(value.name)?;
        let slug = CategorySlug::from_name(&name)?;

        Ok(Self { name, slug })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TITLE_MAX_LENGTH;

    #[test]
    fn add_category_derives_slug() {
        let form = AddCategoryForm {
            name: " Other Frameworks ".to_string(),
        };

        let payload: AddCategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.name.as_str(), "Other Frameworks");
        assert_eq!(payload.slug.as_str(), "other-frameworks");
    }

    #[test]
    fn add_category_rejects_blank_name() {
        let form = AddCategoryForm {
            name: "   ".to_string(),
        };

        let payload: Result<AddCategoryFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(AddCategoryFormError::TypeConstraint(_))));
    }

    #[test]
    fn add_category_rejects_long_name() {
        let form = AddCategoryForm {
            name: "a".repeat(TITLE_MAX_LENGTH + 1),
        };

        let payload: Result<AddCategoryFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(AddCategoryFormError::Validation(_))));
    }

    #[test]
    fn new_category_starts_with_zero_counters() {
        let form = AddCategoryForm {
            name: "Python".to_string(),
        };
        let payload: AddCategoryFormPayload = form.try_into().unwrap();

        let category = payload.into_new_category();
        assert_eq!(category.views, 0);
        assert_eq!(category.likes, 0);
    }
}
