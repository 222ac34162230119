use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, CategoryChanges, NewCategory};
use crate::domain::types::{
    CategoryDescription, CategoryName, DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH,
};
use crate::forms::validation::{FieldRule, Rejected, Violation, check_fields, sanitize};

const CATEGORY_RULES: &[FieldRule] = &[
    FieldRule::min_length("name", 3, "Category name must contain at least 3 characters."),
    FieldRule::max_length(
        "name",
        NAME_MAX_LENGTH,
        "Category name must not exceed 100 characters.",
    ),
    FieldRule::max_length(
        "description",
        DESCRIPTION_MAX_LENGTH,
        "Category description must not exceed 200 characters.",
    ),
];

/// Raw category form as submitted by the create and update pages.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CategoryForm {
    /// Copy of the form that is safe to echo back into a page.
    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize(&self.name),
            description: sanitize(&self.description),
        }
    }

    pub fn violations(&self) -> Vec<Violation> {
        check_fields(
            &[
                ("name", self.name.as_str()),
                ("description", self.description.as_str()),
            ],
            CATEGORY_RULES,
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

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.to_string(),
            description: category
                .description
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
        .sanitized()
    }
}

/// Validated category values ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormPayload {
    pub name: CategoryName,
    pub description: Option<CategoryDescription>,
}

impl CategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_changes(self) -> CategoryChanges {
        CategoryChanges {
            name: self.name,
            description: self.description,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<CategoryForm> for CategoryFormPayload {
    type Error = Rejected<CategoryForm>;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        let violations = value.violations();
        if !violations.is_empty() {
            return Err(Rejected {
                form: value.sanitized(),
                violations,
            });
        }

        let name = CategoryName::new(value.name.as_str())
            .map_err(|e| value.reject(Violation::new("name", e.to_string())))?;
        let description = match value.description.trim() {
            "" => None,
            text => Some(
                CategoryDescription::new(text)
                    .map_err(|e| value.reject(Violation::new("description", e.to_string())))?,
            ),
        };

        Ok(Self { name, description })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CategoryId;

    fn form(name: &str, description: &str) -> CategoryForm {
        CategoryForm {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn accepts_trimmed_name_and_drops_blank_description() {
        let payload: CategoryFormPayload = form("  Audio ", "   ").try_into().unwrap();
        assert_eq!(payload.name.as_str(), "Audio");
        assert_eq!(payload.description, None);
    }

    #[test]
    fn rejects_names_shorter_than_three_characters_after_trim() {
        let rejected = CategoryFormPayload::try_from(form("  ab  ", "")).unwrap_err();
        assert_eq!(
            rejected.violations,
            vec![Violation::new(
                "name",
                "Category name must contain at least 3 characters."
            )]
        );
        assert_eq!(rejected.form.name, "ab");
    }

    #[test]
    fn rejection_echoes_escaped_values() {
        let rejected =
            CategoryFormPayload::try_from(form("<b>", &"d".repeat(201))).unwrap_err();
        assert_eq!(rejected.form.name, "&lt;b&gt;");
        assert_eq!(rejected.violations.len(), 1);
        assert_eq!(rejected.violations[0].field, "description");
    }

    #[test]
    fn prefill_from_category_is_sanitized() {
        let category = Category {
            id: CategoryId::new(1).unwrap(),
            name: CategoryName::new("Tom & Jerry").unwrap(),
            description: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        };
        let form = CategoryForm::from(&category);
        assert_eq!(form.name, "Tom &amp; Jerry");
        assert_eq!(form.description, "");
    }
}
