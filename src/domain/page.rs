use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, PageId, PageTitle, PageUrl, ViewCount};

/// A link filed under exactly one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub category_id: CategoryId,
    pub title: PageTitle,
    pub url: PageUrl,
    pub views: ViewCount,
}

/// Data required to insert a new [`Page`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPage {
    pub category_id: CategoryId,
    pub title: PageTitle,
    pub url: PageUrl,
    pub views: ViewCount,
}
