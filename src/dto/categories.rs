use serde::Serialize;

use crate::domain::category::Category;

/// Category projection used by lists and item views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryListEntry {
    pub id: i32,
    pub name: String,
    pub url: String,
}

impl From<Category> for CategoryListEntry {
    fn from(value: Category) -> Self {
        Self {
            url: value.url(),
            id: value.id.get(),
            name: value.name.into_inner(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            url: value.url(),
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value.description.map(Into::into),
        }
    }
}

/// A category option of the item form's select box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOption {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

impl CategoryOption {
    /// Build options for `categories`, marking the one whose id equals the
    /// submitted `selected` value.
    pub fn list(categories: Vec<Category>, selected: &str) -> Vec<Self> {
        let selected = selected.trim();
        categories
            .into_iter()
            .map(|category| Self {
                selected: category.id.to_string() == selected,
                id: category.id.get(),
                name: category.name.into_inner(),
            })
            .collect()
    }
}
