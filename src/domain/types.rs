//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateLength;

/// Maximum number of characters stored for names.
pub const NAME_MAX_LENGTH: u64 = 100;
/// Maximum number of characters stored for descriptions.
pub const DESCRIPTION_MAX_LENGTH: u64 = 200;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be non-negative was negative or not finite.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string exceeded its maximum length.
    #[error("{0} must not exceed {1} characters")]
    TooLong(&'static str, u64),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

/// Trimmed, non-empty strings capped at `$max` characters.
macro_rules! bounded_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value within the length cap.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.validate_length(None, Some($max), None) {
                    return Err(TypeConstraintError::TooLong($field, $max));
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);
id_newtype!(ItemId, "Unique identifier for an item.", "item_id");

bounded_string_newtype!(
    CategoryName,
    "Category name, the soft-unique key of a category.",
    "category name",
    NAME_MAX_LENGTH
);
bounded_string_newtype!(
    CategoryDescription,
    "Optional free-text category description.",
    "category description",
    DESCRIPTION_MAX_LENGTH
);
bounded_string_newtype!(ItemName, "Item display name.", "item name", NAME_MAX_LENGTH);
bounded_string_newtype!(
    ItemDescription,
    "Item description.",
    "item description",
    DESCRIPTION_MAX_LENGTH
);

/// Non-negative price value in standard currency units.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct ItemPrice(f64);

impl ItemPrice {
    /// Constructs a finite price that is zero or greater.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("price"))
        }
    }

    /// Returns the raw `f64` value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for ItemPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for ItemPrice {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<f64> for ItemPrice {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

/// Number of units of an item currently in stock.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct StockCount(i32);

impl StockCount {
    /// Constructs a stock count that must be zero or greater.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("number in stock"))
        }
    }

    /// Returns the raw `i32` value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for StockCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for StockCount {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<i32> for StockCount {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_names() {
        let value = CategoryName::new("  Audio  ").unwrap();
        assert_eq!(value.as_str(), "Audio");
    }

    #[test]
    fn rejects_whitespace_only_names() {
        let err = ItemName::new("   ").unwrap_err();
        assert_eq!(err, TypeConstraintError::EmptyString("item name"));
    }

    #[test]
    fn rejects_names_over_the_cap() {
        let err = CategoryName::new("x".repeat(101)).unwrap_err();
        assert_eq!(err, TypeConstraintError::TooLong("category name", 100));
        assert!(CategoryName::new("x".repeat(100)).is_ok());
    }

    #[test]
    fn length_cap_counts_characters() {
        assert!(ItemDescription::new("é".repeat(200)).is_ok());
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = ItemId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("item_id"));
        assert!(CategoryId::new(-3).is_err());
    }

    #[test]
    fn item_price_allows_zero() {
        assert_eq!(ItemPrice::new(0.0).unwrap().get(), 0.0);
    }

    #[test]
    fn item_price_rejects_negative_and_non_finite_numbers() {
        assert_eq!(
            ItemPrice::new(-0.01).unwrap_err(),
            TypeConstraintError::NegativeNumber("price")
        );
        assert!(ItemPrice::new(f64::NAN).is_err());
    }

    #[test]
    fn stock_count_rejects_negative_numbers() {
        assert!(StockCount::new(0).is_ok());
        assert_eq!(
            StockCount::new(-1).unwrap_err(),
            TypeConstraintError::NegativeNumber("number in stock")
        );
    }
}
