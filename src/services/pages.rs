use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{PageId, PageUrl};
use crate::dto::categories::CategoryDto;
use crate::dto::pages::PageDto;
use crate::forms::pages::AddPageFormPayload;
use crate::repository::{CategoryReader, PageReader, PageWriter, RepositoryError};

use super::categories::find_category;
use super::{ServiceError, ServiceResult, require_user};

/// Resolves the category a new page would be filed under.
pub fn show_add_page<R>(
    slug: &str,
    user: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader,
{
    require_user(user)?;

    match find_category(slug, repo)? {
        Some(category) => Ok(category.into()),
        None => Err(ServiceError::NotFound),
    }
}

pub fn add_page<R>(
    slug: &str,
    payload: AddPageFormPayload,
    user: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<PageDto>
where
    R: CategoryReader + PageWriter,
{
    let user = require_user(user)?;

    let Some(category) = find_category(slug, repo)? else {
        return Err(ServiceError::NotFound);
    };

    let page = payload.into_new_page(category.id);
    match repo.create_page(&page) {
        Ok(created) => {
            log::info!(
                "User {} added page '{}' to '{}'",
                user.username,
                created.title,
                category.name
            );
            Ok(created.into())
        }
        // The category was deleted between the lookup and the insert.
        Err(RepositoryError::ConstraintViolation(_)) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to create page: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Counts a click-through on a page and returns where to send the visitor.
pub fn goto_page<R>(page_id: i32, repo: &R) -> ServiceResult<PageUrl>
where
    R: PageReader + PageWriter,
{
    let Ok(page_id) = PageId::new(page_id) else {
        return Err(ServiceError::NotFound);
    };

    let page = match repo.get_page_by_id(page_id) {
        Ok(Some(page)) => page,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get page: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if let Err(e) = repo.add_page_view(page.id) {
        log::error!("Failed to count page view: {e}");
    }

    Ok(page.url)
}
