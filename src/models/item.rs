use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::item::{
    Item as DomainItem, ItemChanges as DomainItemChanges, NewItem as DomainNewItem,
};
use crate::domain::types::{
    ItemDescription, ItemName, ItemPrice, StockCount, TypeConstraintError,
};

/// Diesel model representing the `items` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::items)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub number_in_stock: i32,
    pub category_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Item`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::items)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub number_in_stock: i32,
    pub category_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Patch replacing every mutable column of an item.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::items)]
pub struct ItemChanges {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub number_in_stock: i32,
    pub category_id: i32,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Item> for DomainItem {
    type Error = TypeConstraintError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id.try_into()?,
            name: ItemName::new(item.name)?,
            description: ItemDescription::new(item.description)?,
            price: ItemPrice::new(item.price)?,
            number_in_stock: StockCount::new(item.number_in_stock)?,
            category_id: item.category_id.try_into()?,
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }
}

impl From<DomainNewItem> for NewItem {
    fn from(item: DomainNewItem) -> Self {
        Self {
            name: item.name.into_inner(),
            description: item.description.into_inner(),
            price: item.price.get(),
            number_in_stock: item.number_in_stock.get(),
            category_id: item.category_id.get(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<DomainItemChanges> for ItemChanges {
    fn from(changes: DomainItemChanges) -> Self {
        Self {
            name: changes.name.into_inner(),
            description: changes.description.into_inner(),
            price: changes.price.get(),
            number_in_stock: changes.number_in_stock.get(),
            category_id: changes.category_id.get(),
            updated_at: changes.updated_at,
        }
    }
}
