use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, CategorySlug, LikeCount, ViewCount};

/// A named group of pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub views: ViewCount,
    pub likes: LikeCount,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub views: ViewCount,
    pub likes: LikeCount,
}

impl NewCategory {
    /// A fresh category with zeroed counters and the slug derived from `name`.
    pub fn new(name: CategoryName, slug: CategorySlug) -> Self {
        Self {
            name,
            slug,
            views: ViewCount::zero(),
            likes: LikeCount::zero(),
        }
    }
}
