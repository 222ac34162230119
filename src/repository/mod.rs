use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategoryChanges, NewCategory};
use crate::domain::item::{Item, ItemChanges, ItemWithCategory, NewItem};
use crate::domain::types::{CategoryId, CategoryName, ItemId};

pub use errors::{RepositoryError, RepositoryResult};

pub mod category;
pub mod errors;
pub mod item;

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

/// Query parameters used when listing items.
#[derive(Debug, Clone, Default)]
pub struct ItemListQuery {
    /// Restrict to items referencing this category.
    pub category_id: Option<CategoryId>,
}

impl ItemListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Retrieve a category by exact, case-sensitive name.
    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>>;
    fn count_categories(&self) -> RepositoryResult<usize>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return the stored row.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Replace name and description of a category.
    fn update_category(&self, id: CategoryId, changes: &CategoryChanges)
    -> RepositoryResult<usize>;
    /// Delete a category by id. Referencing items are not checked here.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for item entities.
pub trait ItemReader {
    /// List items matching the query ordered by name, with categories resolved.
    fn list_items(&self, query: ItemListQuery) -> RepositoryResult<Vec<ItemWithCategory>>;
    /// Retrieve an item by its identifier with its category resolved.
    fn get_item_by_id(&self, id: ItemId) -> RepositoryResult<Option<ItemWithCategory>>;
    fn count_items(&self) -> RepositoryResult<usize>;
}

/// Write operations for item entities.
pub trait ItemWriter {
    /// Persist a new item and return the stored row.
    fn create_item(&self, item: &NewItem) -> RepositoryResult<Item>;
    /// Replace every mutable field of an item, keeping its id.
    fn update_item(&self, id: ItemId, changes: &ItemChanges) -> RepositoryResult<usize>;
    fn delete_item(&self, id: ItemId) -> RepositoryResult<usize>;
}
