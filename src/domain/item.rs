use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{CategoryId, ItemDescription, ItemId, ItemName, ItemPrice, StockCount};

/// Location of the detail page of an item.
pub fn item_url(id: ItemId) -> String {
    format!("/catalog/item/{id}")
}

/// Persisted item record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub name: ItemName,
    pub description: ItemDescription,
    pub price: ItemPrice,
    pub number_in_stock: StockCount,
    pub category_id: CategoryId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Item {
    pub fn url(&self) -> String {
        item_url(self.id)
    }
}

/// An item together with its resolved category.
///
/// `category` is `None` only when the referenced row no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemWithCategory {
    pub item: Item,
    pub category: Option<Category>,
}

/// Information required to create a new [`Item`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewItem {
    pub name: ItemName,
    pub description: ItemDescription,
    pub price: ItemPrice,
    pub number_in_stock: StockCount,
    pub category_id: CategoryId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Replacement values for every mutable field of an [`Item`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItemChanges {
    pub name: ItemName,
    pub description: ItemDescription,
    pub price: ItemPrice,
    pub number_in_stock: StockCount,
    pub category_id: CategoryId,
    pub updated_at: NaiveDateTime,
}
