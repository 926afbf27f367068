use serde::Serialize;

use crate::domain::page::Page;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDto {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub url: String,
    pub views: i32,
}

impl From<Page> for PageDto {
    fn from(value: Page) -> Self {
        Self {
            id: value.id.get(),
            category_id: value.category_id.get(),
            title: value.title.into_inner(),
            url: value.url.into_inner(),
            views: value.views.get(),
        }
    }
}
