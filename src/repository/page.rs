use diesel::prelude::*;

use crate::domain::page::{NewPage, Page};
use crate::domain::types::PageId;
use crate::models::page::{NewPage as DbNewPage, Page as DbPage};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, PageListQuery, PageOrder, PageReader, PageWriter};

impl PageReader for DieselRepository {
    fn list_pages(&self, query: PageListQuery) -> RepositoryResult<(usize, Vec<Page>)> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = pages::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category_id) = query.category_id {
                items = items.filter(pages::category_id.eq(category_id.get()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = match query.order {
            PageOrder::Title => query_builder().order((pages::title.asc(), pages::id.asc())),
            PageOrder::MostViewed => query_builder().order((pages::views.desc(), pages::id.asc())),
        };
        if let Some(limit) = query.limit {
            items = items.limit(limit as i64);
        }

        let items = items
            .load::<DbPage>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Page>, _>>()?;

        Ok((total, items))
    }

    fn get_page_by_id(&self, id: PageId) -> RepositoryResult<Option<Page>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let page = pages::table
            .find(id.get())
            .first::<DbPage>(&mut conn)
            .optional()?;

        Ok(page.map(TryInto::try_into).transpose()?)
    }
}

impl PageWriter for DieselRepository {
    fn create_page(&self, page: &NewPage) -> RepositoryResult<Page> {
        use crate::schema::pages;

        let mut conn = self.conn()?;
        let db_page: DbNewPage = page.clone().into();

        let created = diesel::insert_into(pages::table)
            .values(db_page)
            .get_result::<DbPage>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn add_page_view(&self, id: PageId) -> RepositoryResult<usize> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let affected = diesel::update(pages::table.find(id.get()))
            .set(pages::views.eq(pages::views + 1))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
