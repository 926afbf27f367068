use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, CategorySlug};
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CategoryListQuery, CategoryOrder, CategoryReader, CategoryWriter, DieselRepository,
};

impl CategoryReader for DieselRepository {
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let total = categories::table.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = categories::table.into_boxed::<diesel::sqlite::Sqlite>();
        items = match query.order {
            CategoryOrder::Name => items.order(categories::name.asc()),
            CategoryOrder::MostLiked => {
                items.order((categories::likes.desc(), categories::name.asc()))
            }
            CategoryOrder::MostViewed => {
                items.order((categories::views.desc(), categories::name.asc()))
            }
        };
        if let Some(limit) = query.limit {
            items = items.limit(limit as i64);
        }

        let items = items
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok((total, items))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .find(id.get())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(TryInto::try_into).transpose()?)
    }

    fn get_category_by_slug(&self, slug: &CategorySlug) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::slug.eq(slug.as_str()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(TryInto::try_into).transpose()?)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let created = diesel::insert_into(categories::table)
            .values(db_category)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn add_category_view(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::update(categories::table.find(id.get()))
            .set(categories::views.eq(categories::views + 1))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn add_category_like(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::update(categories::table.find(id.get()))
            .set(categories::likes.eq(categories::likes + 1))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::{categories, pages};

        let mut conn = self.conn()?;

        // Pages go first so this also holds with foreign keys disabled.
        let affected = conn.transaction(|conn| {
            diesel::delete(pages::table.filter(pages::category_id.eq(id.get()))).execute(conn)?;
            diesel::delete(categories::table.find(id.get())).execute(conn)
        })?;

        Ok(affected)
    }
}
