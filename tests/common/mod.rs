//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::Utc;
use inventory_catalog::db::{DbPool, establish_connection_pool, run_migrations};
use inventory_catalog::domain::category::{Category, NewCategory};
use inventory_catalog::domain::item::{Item, NewItem};
use inventory_catalog::domain::types::{
    CategoryDescription, CategoryId, CategoryName, ItemDescription, ItemName, ItemPrice,
    StockCount,
};
use inventory_catalog::repository::{CategoryWriter, DieselRepository, ItemWriter};
use tempfile::NamedTempFile;

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        run_migrations(&mut conn).expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    /// Database file without any tables, so every query fails.
    pub fn without_schema() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn insert_category(repo: &DieselRepository, name: &str, description: Option<&str>) -> Category {
    let now = Utc::now().naive_utc();
    repo.create_category(&NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        description: description
            .map(|d| CategoryDescription::new(d).expect("valid category description")),
        created_at: now,
        updated_at: now,
    })
    .expect("should create category")
}

pub fn insert_item(repo: &DieselRepository, name: &str, category_id: CategoryId) -> Item {
    let now = Utc::now().naive_utc();
    repo.create_item(&NewItem {
        name: ItemName::new(name).expect("valid item name"),
        description: ItemDescription::new(format!("About {name}")).expect("valid description"),
        price: ItemPrice::new(49.5).expect("valid price"),
        number_in_stock: StockCount::new(4).expect("valid stock"),
        category_id,
        created_at: now,
        updated_at: now,
    })
    .expect("should create item")
}
