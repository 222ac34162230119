use serde::Serialize;

use crate::domain::item::ItemWithCategory;
use crate::dto::categories::CategoryListEntry;

/// Item view with its category resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub number_in_stock: i32,
    pub url: String,
    pub category: Option<CategoryListEntry>,
}

impl From<ItemWithCategory> for ItemDto {
    fn from(value: ItemWithCategory) -> Self {
        let ItemWithCategory { item, category } = value;
        Self {
            url: item.url(),
            id: item.id.get(),
            name: item.name.into_inner(),
            description: item.description.into_inner(),
            price: item.price.get(),
            number_in_stock: item.number_in_stock.get(),
            category: category.map(CategoryListEntry::from),
        }
    }
}

/// Totals shown on the catalog home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub category_count: usize,
    pub item_count: usize,
}
