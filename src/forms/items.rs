use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::item::{Item, ItemChanges, NewItem};
use crate::domain::types::{
    CategoryId, DESCRIPTION_MAX_LENGTH, ItemDescription, ItemName, ItemPrice, NAME_MAX_LENGTH,
    StockCount,
};
use crate::forms::validation::{
    FieldRule, Rejected, Violation, check_fields, has_violation, sanitize,
};

const ITEM_RULES: &[FieldRule] = &[
    FieldRule::required("name", "name must not be empty."),
    FieldRule::required("description", "description must not be empty."),
    FieldRule::required("price", "price must not be empty."),
    FieldRule::required("number_in_stock", "number in stock must not be empty."),
    FieldRule::required("category", "Category must not be empty."),
    FieldRule::max_length("name", NAME_MAX_LENGTH, "name must not exceed 100 characters."),
    FieldRule::max_length(
        "description",
        DESCRIPTION_MAX_LENGTH,
        "description must not exceed 200 characters.",
    ),
];

/// Raw item form as submitted by the create and update pages.
///
/// Numeric fields stay textual so that whatever was typed can be echoed back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub number_in_stock: String,
    /// Identifier of the selected category.
    #[serde(default)]
    pub category: String,
}

impl ItemForm {
    /// Copy of the form that is safe to echo back into a page.
    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize(&self.name),
            description: sanitize(&self.description),
            price: sanitize(&self.price),
            number_in_stock: sanitize(&self.number_in_stock),
            category: sanitize(&self.category),
        }
    }

    pub fn violations(&self) -> Vec<Violation> {
        check_fields(
            &[
                ("name", self.name.as_str()),
                ("description", self.description.as_str()),
                ("price", self.price.as_str()),
                ("number_in_stock", self.number_in_stock.as_str()),
                ("category", self.category.as_str()),
            ],
            ITEM_RULES,
        )
    }

    /// Rejection of this submission with an extra violation found after
    /// field-level validation passed.
    pub fn reject(&self, violation: Violation) -> Rejected<Self> {
        Rejected {
            form: self.sanitized(),
            violations: vec![violation],
        }
    }
}

impl From<&Item> for ItemForm {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.to_string(),
            description: item.description.to_string(),
            price: item.price.to_string(),
            number_in_stock: item.number_in_stock.to_string(),
            category: item.category_id.to_string(),
        }
        .sanitized()
    }
}

/// Validated item values ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFormPayload {
    pub name: ItemName,
    pub description: ItemDescription,
    pub price: ItemPrice,
    pub number_in_stock: StockCount,
    pub category_id: CategoryId,
}

impl ItemFormPayload {
    pub fn into_new_item(self) -> NewItem {
        let now = Utc::now().naive_utc();
        NewItem {
            name: self.name,
            description: self.description,
            price: self.price,
            number_in_stock: self.number_in_stock,
            category_id: self.category_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_changes(self) -> ItemChanges {
        ItemChanges {
            name: self.name,
            description: self.description,
            price: self.price,
            number_in_stock: self.number_in_stock,
            category_id: self.category_id,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

fn parse_price(value: &str) -> Result<ItemPrice, String> {
    let number = value
        .trim()
        .parse::<f64>()
        .map_err(|_| "price must be a number.".to_string())?;
    ItemPrice::new(number).map_err(|e| e.to_string())
}

fn parse_stock(value: &str) -> Result<StockCount, String> {
    let number = value
        .trim()
        .parse::<i32>()
        .map_err(|_| "number in stock must be a whole number.".to_string())?;
    StockCount::new(number).map_err(|e| e.to_string())
}

fn parse_category(value: &str) -> Result<CategoryId, String> {
    value
        .trim()
        .parse::<i32>()
        .ok()
        .and_then(|id| CategoryId::new(id).ok())
        .ok_or_else(|| "Category must be one of the listed categories.".to_string())
}

/// Keep a typed conversion result, recording its message unless the field
/// already failed a length rule.
fn typed<T>(
    violations: &mut Vec<Violation>,
    field: &'static str,
    result: Result<T, String>,
) -> Option<T> {
    match result {
        Ok(parsed) => Some(parsed),
        Err(message) => {
            if !has_violation(violations, field) {
                violations.push(Violation::new(field, message));
            }
            None
        }
    }
}

impl TryFrom<ItemForm> for ItemFormPayload {
    type Error = Rejected<ItemForm>;

    fn try_from(value: ItemForm) -> Result<Self, Self::Error> {
        let mut violations = value.violations();

        let name = typed(
            &mut violations,
            "name",
            ItemName::new(value.name.as_str()).map_err(|e| e.to_string()),
        );
        let description = typed(
            &mut violations,
            "description",
            ItemDescription::new(value.description.as_str()).map_err(|e| e.to_string()),
        );
        let price = typed(&mut violations, "price", parse_price(&value.price));
        let number_in_stock = typed(
            &mut violations,
            "number_in_stock",
            parse_stock(&value.number_in_stock),
        );
        let category_id = typed(&mut violations, "category", parse_category(&value.category));

        match (name, description, price, number_in_stock, category_id) {
            (Some(name), Some(description), Some(price), Some(number_in_stock), Some(category_id))
                if violations.is_empty() =>
            {
                Ok(Self {
                    name,
                    description,
                    price,
                    number_in_stock,
                    category_id,
                })
            }
            _ => Err(Rejected {
                form: value.sanitized(),
                violations,
            }),
        }
    }
}
