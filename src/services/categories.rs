use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::domain::types::CategorySlug;
use crate::dto::categories::CategoryDto;
use crate::dto::pages::PageDto;
use crate::forms::categories::AddCategoryFormPayload;
use crate::repository::{
    CategoryReader, CategoryWriter, PageListQuery, PageOrder, PageReader, RepositoryError,
};

use super::{ServiceError, ServiceResult, require_user};

/// A category with its pages. `category` is `None` when the slug matches
/// nothing, in which case `pages` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDetail {
    pub category: Option<CategoryDto>,
    pub pages: Vec<PageDto>,
}

/// Looks a category up by slug. Malformed slugs simply match nothing.
pub(crate) fn find_category<R>(slug: &str, repo: &R) -> ServiceResult<Option<Category>>
where
    R: CategoryReader + ?Sized,
{
    let Ok(slug) = CategorySlug::new(slug) else {
        return Ok(None);
    };

    repo.get_category_by_slug(&slug).map_err(|e| {
        log::error!("Failed to get category by slug: {e}");
        ServiceError::Internal
    })
}

/// Loads a category and its pages and counts the view.
///
/// An unknown slug is not an error: the caller receives an empty detail and
/// renders the "no such category" variant of the page.
pub fn show_category<R>(slug: &str, repo: &R) -> ServiceResult<CategoryDetail>
where
    R: CategoryReader + CategoryWriter + PageReader,
{
    let Some(mut category) = find_category(slug, repo)? else {
        return Ok(CategoryDetail {
            category: None,
            pages: vec![],
        });
    };

    match repo.add_category_view(category.id) {
        Ok(_) => category.views = category.views.incremented(),
        Err(e) => log::error!("Failed to count category view: {e}"),
    }

    let query = PageListQuery::default()
        .category(category.id)
        .order_by(PageOrder::MostViewed);
    let pages = match repo.list_pages(query) {
        Ok((_total, pages)) => pages.into_iter().map(PageDto::from).collect(),
        Err(e) => {
            log::error!("Failed to list pages: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(CategoryDetail {
        category: Some(category.into()),
        pages,
    })
}

pub fn add_category<R>(
    payload: AddCategoryFormPayload,
    user: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    let user = require_user(user)?;

    let category = payload.into_new_category();
    match repo.create_category(&category) {
        Ok(created) => {
            log::info!("User {} added category '{}'", user.username, created.name);
            Ok(created.into())
        }
        Err(RepositoryError::ConstraintViolation(_)) => Err(ServiceError::Conflict(format!(
            "Category '{}' already exists.",
            category.name
        ))),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Records a like and returns the updated category.
pub fn like_category<R>(
    slug: &str,
    user: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
{
    require_user(user)?;

    let Some(mut category) = find_category(slug, repo)? else {
        return Err(ServiceError::NotFound);
    };

    match repo.add_category_like(category.id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            category.likes = category.likes.incremented();
            Ok(category.into())
        }
        Err(e) => {
            log::error!("Failed to like category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes a category; its pages go with it.
pub fn delete_category<R>(
    slug: &str,
    user: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    let user = require_user(user)?;

    let Some(category) = find_category(slug, repo)? else {
        return Err(ServiceError::NotFound);
    };

    match repo.delete_category(category.id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("User {} deleted category '{}'", user.username, category.name);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CategoryId, CategoryName, UserId, Username};
    use crate::repository::test::TestRepository;
    use crate::services::main::fixtures::{category, page};

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(1).unwrap(),
            username: Username::new("leif").unwrap(),
        }
    }

    fn sample_repo() -> TestRepository {
        TestRepository::new(
            vec![category(1, "Python", 64), category(2, "Django", 32)],
            vec![page(1, 1, 5), page(2, 1, 9), page(3, 2, 1)],
        )
    }

    #[test]
    fn shows_category_with_its_pages() {
        let repo = sample_repo();

        let detail = show_category("python", &repo).unwrap();

        let category = detail.category.unwrap();
        assert_eq!(category.name, "Python");
        assert_eq!(detail.pages.len(), 2);
        assert_eq!(detail.pages[0].id, 2);
    }

    #[test]
    fn showing_a_category_counts_a_view() {
        let repo = sample_repo();
        let before = repo.category(CategoryId::new(1).unwrap()).unwrap().views;

        let detail = show_category("python", &repo).unwrap();

        let after = repo.category(CategoryId::new(1).unwrap()).unwrap().views;
        assert_eq!(after, before.incremented());
        assert_eq!(detail.category.unwrap().views, after.get());
    }

    #[test]
    fn unknown_slug_yields_empty_detail() {
        let repo = sample_repo();

        let detail = show_category("haskell", &repo).unwrap();

        assert_eq!(detail.category, None);
        assert!(detail.pages.is_empty());
    }

    #[test]
    fn malformed_slug_yields_empty_detail() {
        let repo = sample_repo();

        let detail = show_category("Not A Slug!", &repo).unwrap();

        assert_eq!(detail.category, None);
        assert!(detail.pages.is_empty());
    }

    #[test]
    fn add_category_requires_login() {
        let repo = sample_repo();
        let name = CategoryName::new("Rust").unwrap();
        let payload = AddCategoryFormPayload {
            slug: CategorySlug::from_name(&name).unwrap(),
            name,
        };

        let err = add_category(payload, None, &repo).unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);
    }

    #[test]
    fn add_category_creates_zeroed_category() {
        let repo = sample_repo();
        let name = CategoryName::new("Rust").unwrap();
        let payload = AddCategoryFormPayload {
            slug: CategorySlug::from_name(&name).unwrap(),
            name,
        };

        let created = add_category(payload, Some(&sample_user()), &repo).unwrap();

        assert_eq!(created.slug, "rust");
        assert_eq!(created.views, 0);
        assert_eq!(created.likes, 0);
    }

    #[test]
    fn duplicate_category_is_a_conflict() {
        let repo = sample_repo();
        let name = CategoryName::new("Python").unwrap();
        let payload = AddCategoryFormPayload {
            slug: CategorySlug::from_name(&name).unwrap(),
            name,
        };

        let err = add_category(payload, Some(&sample_user()), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn like_increments_likes() {
        let repo = sample_repo();

        let liked = like_category("django", Some(&sample_user()), &repo).unwrap();

        assert_eq!(liked.likes, 33);
        assert_eq!(repo.category(CategoryId::new(2).unwrap()).unwrap().likes, 33);
    }

    #[test]
    fn delete_category_removes_its_pages() {
        let repo = sample_repo();

        delete_category("python", Some(&sample_user()), &repo).unwrap();

        assert!(repo.category(CategoryId::new(1).unwrap()).is_none());
        assert_eq!(repo.page_count(), 1);
    }

    #[test]
    fn delete_unknown_category_is_not_found() {
        let repo = sample_repo();

        let err = delete_category("haskell", Some(&sample_user()), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }
}
