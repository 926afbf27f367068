use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::note::{NewNote, Note};
use crate::domain::page::{NewPage, Page};
use crate::domain::types::{CategoryId, CategorySlug, PageId, UserId, Username};
use crate::domain::user::{NewUser, User};

pub mod category;
pub mod errors;
pub mod note;
pub mod page;
pub mod user;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Sort order for category listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryOrder {
    #[default]
    Name,
    MostLiked,
    MostViewed,
}

/// Query parameters used when listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    pub order: CategoryOrder,
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
}

impl CategoryListQuery {
    pub fn order_by(mut self, order: CategoryOrder) -> Self {
        self.order = order;
        self
    }
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Sort order for page listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageOrder {
    #[default]
    Title,
    MostViewed,
}

/// Query parameters used when listing pages.
#[derive(Debug, Clone, Default)]
pub struct PageListQuery {
    /// Restrict to pages of one category.
    pub category_id: Option<CategoryId>,
    pub order: PageOrder,
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
}

impl PageListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn order_by(mut self, order: PageOrder) -> Self {
        self.order = order;
        self
    }
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options. Returns the total
    /// number of categories alongside the selected rows.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Retrieve a category by its slug.
    fn get_category_by_slug(&self, slug: &CategorySlug) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return it with its identifier.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Bump the view counter of a category.
    fn add_category_view(&self, id: CategoryId) -> RepositoryResult<usize>;
    /// Bump the like counter of a category.
    fn add_category_like(&self, id: CategoryId) -> RepositoryResult<usize>;
    /// Delete a category together with all of its pages.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for page entities.
pub trait PageReader {
    /// List pages matching the supplied query parameters.
    fn list_pages(&self, query: PageListQuery) -> RepositoryResult<(usize, Vec<Page>)>;
    /// Retrieve a page by its identifier.
    fn get_page_by_id(&self, id: PageId) -> RepositoryResult<Option<Page>>;
}

/// Write operations for page entities.
pub trait PageWriter {
    /// Persist a new page and return it with its identifier.
    fn create_page(&self, page: &NewPage) -> RepositoryResult<Page>;
    /// Bump the view counter of a page.
    fn add_page_view(&self, id: PageId) -> RepositoryResult<usize>;
}

/// Read-only operations for user accounts.
pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>>;
}

/// Write operations for user accounts.
pub trait UserWriter {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
}

pub trait NoteReader {
    /// All notes ordered by name.
    fn list_notes(&self) -> RepositoryResult<Vec<Note>>;
}

pub trait NoteWriter {
    fn create_note(&self, note: &NewNote) -> RepositoryResult<Note>;
}
