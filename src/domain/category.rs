use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryDescription, CategoryId, CategoryName};

/// Location of the detail page of a category.
pub fn category_url(id: CategoryId) -> String {
    format!("/catalog/category/{id}")
}

/// Persisted category record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: Option<CategoryDescription>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Category {
    pub fn url(&self) -> String {
        category_url(self.id)
    }
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub description: Option<CategoryDescription>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Replacement values for the mutable fields of a [`Category`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChanges {
    pub name: CategoryName,
    pub description: Option<CategoryDescription>,
    pub updated_at: NaiveDateTime,
}
