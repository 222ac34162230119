//! Field rules shared by the category and item forms.
//!
//! Every rule is evaluated so that a single submission reports all of its
//! problems at once. Values echoed back into a form go through [`sanitize`].

use serde::Serialize;
use validator::ValidateLength;

/// Length constraint on a single named form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    /// Strip surrounding whitespace before measuring.
    pub trim: bool,
    pub min_length: u64,
    pub max_length: Option<u64>,
    pub message: &'static str,
}

impl FieldRule {
    /// Field must contain at least one character after trimming.
    pub const fn required(field: &'static str, message: &'static str) -> Self {
        Self::min_length(field, 1, message)
    }

    pub const fn min_length(field: &'static str, min: u64, message: &'static str) -> Self {
        Self {
            field,
            trim: true,
            min_length: min,
            max_length: None,
            message,
        }
    }

    pub const fn max_length(field: &'static str, max: u64, message: &'static str) -> Self {
        Self {
            field,
            trim: true,
            min_length: 0,
            max_length: Some(max),
            message,
        }
    }

    fn accepts(&self, value: &str) -> bool {
        let value = if self.trim { value.trim() } else { value };
        value.validate_length(Some(self.min_length), self.max_length, None)
    }
}

/// A rule that did not hold for a submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A submission that failed validation, carrying the sanitized echo of the
/// entered values and every violation in rule order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejected<F> {
    pub form: F,
    pub violations: Vec<Violation>,
}

/// Apply `rules` in order to `fields`. A field that was not submitted is
/// checked as the empty string.
pub fn check_fields(fields: &[(&str, &str)], rules: &[FieldRule]) -> Vec<Violation> {
    rules
        .iter()
        .filter(|rule| {
            let value = fields
                .iter()
                .find(|(name, _)| *name == rule.field)
                .map(|(_, value)| *value)
                .unwrap_or_default();
            !rule.accepts(value)
        })
        .map(|rule| Violation::new(rule.field, rule.message))
        .collect()
}

/// Whether `field` already has a reported violation.
pub fn has_violation(violations: &[Violation], field: &str) -> bool {
    violations.iter().any(|v| v.field == field)
}

/// Trim `value` and escape the characters that are significant in HTML so it
/// can be written back into a form verbatim.
pub fn sanitize(value: &str) -> String {
    html_escape::encode_safe(value.trim())
        .replace('\\', "&#x5C;")
        .replace('`', "&#96;")
}
