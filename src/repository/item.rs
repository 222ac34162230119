use diesel::prelude::*;

use crate::domain::item::{Item, ItemChanges, ItemWithCategory, NewItem};
use crate::domain::types::ItemId;
use crate::models::category::Category as DbCategory;
use crate::models::item::{Item as DbItem, ItemChanges as DbItemChanges, NewItem as DbNewItem};
use crate::repository::{
    DieselRepository, ItemListQuery, ItemReader, ItemWriter, RepositoryResult,
};

fn resolve_row(
    (item, category): (DbItem, Option<DbCategory>),
) -> RepositoryResult<ItemWithCategory> {
    Ok(ItemWithCategory {
        item: item.try_into()?,
        category: category.map(TryInto::try_into).transpose()?,
    })
}

impl ItemReader for DieselRepository {
    fn list_items(&self, query: ItemListQuery) -> RepositoryResult<Vec<ItemWithCategory>> {
        use crate::schema::{categories, items};

        let mut conn = self.conn()?;

        let mut rows = items::table
            .left_join(categories::table)
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            rows = rows.filter(items::category_id.eq(category_id.get()));
        }

        let items = rows
            .order((items::name.asc(), items::id.asc()))
            .load::<(DbItem, Option<DbCategory>)>(&mut conn)?
            .into_iter()
            .map(resolve_row)
            .collect::<RepositoryResult<Vec<ItemWithCategory>>>()?;

        Ok(items)
    }

    fn get_item_by_id(&self, id: ItemId) -> RepositoryResult<Option<ItemWithCategory>> {
        use crate::schema::{categories, items};

        let mut conn = self.conn()?;

        let row = items::table
            .left_join(categories::table)
            .filter(items::id.eq(id.get()))
            .first::<(DbItem, Option<DbCategory>)>(&mut conn)
            .optional()?;

        row.map(resolve_row).transpose()
    }

    fn count_items(&self) -> RepositoryResult<usize> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let total = items::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl ItemWriter for DieselRepository {
    fn create_item(&self, item: &NewItem) -> RepositoryResult<Item> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let db_item: DbNewItem = item.clone().into();

        let stored = diesel::insert_into(items::table)
            .values(db_item)
            .get_result::<DbItem>(&mut conn)?;

        let stored: Item = stored.try_into()?;
        Ok(stored)
    }

    fn update_item(&self, id: ItemId, changes: &ItemChanges) -> RepositoryResult<usize> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let db_changes: DbItemChanges = changes.clone().into();

        let affected = diesel::update(items::table.filter(items::id.eq(id.get())))
            .set(db_changes)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_item(&self, id: ItemId) -> RepositoryResult<usize> {
        use crate::schema::items;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(items::table.filter(items::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
