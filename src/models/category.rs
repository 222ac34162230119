use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, CategoryChanges as DomainCategoryChanges,
    NewCategory as DomainNewCategory,
};
use crate::domain::types::{CategoryDescription, CategoryName, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Patch applied by category updates. `description` is written even when
/// `None` so that clearing it is persisted.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::categories, treat_none_as_null = true)]
pub struct CategoryChanges {
    pub name: String,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name: CategoryName::new(category.name)?,
            description: category
                .description
                .filter(|d| !d.trim().is_empty())
                .map(CategoryDescription::new)
                .transpose()?,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }
}

impl From<DomainNewCategory> for NewCategory {
    fn from(category: DomainNewCategory) -> Self {
        Self {
            name: category.name.into_inner(),
            description: category.description.map(CategoryDescription::into_inner),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl From<DomainCategoryChanges> for CategoryChanges {
    fn from(changes: DomainCategoryChanges) -> Self {
        Self {
            name: changes.name.into_inner(),
            description: changes.description.map(CategoryDescription::into_inner),
            updated_at: changes.updated_at,
        }
    }
}
