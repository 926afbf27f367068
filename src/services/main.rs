use crate::dto::categories::CategoryDto;
use crate::dto::pages::PageDto;
use crate::repository::{
    CategoryListQuery, CategoryOrder, CategoryReader, PageListQuery, PageOrder, PageReader,
};

use super::{ServiceError, ServiceResult};

/// How many categories and pages the index page features.
pub const INDEX_LIST_LIMIT: usize = 5;

pub const BOLD_MESSAGE: &str = "Crunchy, creamy, cookie, candy, cupcake!";

/// Data rendered on the index page.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexData {
    /// Most liked categories first.
    pub categories: Vec<CategoryDto>,
    /// Most viewed pages first.
    pub pages: Vec<PageDto>,
}

/// Core business logic for rendering the index page.
pub fn show_index<R>(repo: &R) -> ServiceResult<IndexData>
where
    R: CategoryReader + PageReader,
{
    let query = CategoryListQuery::default()
        .order_by(CategoryOrder::MostLiked)
        .limit(INDEX_LIST_LIMIT);
    let categories = match repo.list_categories(query) {
        Ok((_total, categories)) => categories.into_iter().map(CategoryDto::from).collect(),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let query = PageListQuery::default()
        .order_by(PageOrder::MostViewed)
        .limit(INDEX_LIST_LIMIT);
    let pages = match repo.list_pages(query) {
        Ok((_total, pages)) => pages.into_iter().map(PageDto::from).collect(),
        Err(e) => {
            log::error!("Failed to list pages: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(IndexData { categories, pages })
}
