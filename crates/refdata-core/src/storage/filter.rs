//! Backend-neutral document filters

use serde_json::Value;

/// A predicate over stored documents
///
/// Field names address top-level document fields only.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Match every document
    All,
    /// Field equals the value exactly
    Eq {
        /// Field name
        field: String,
        /// Expected value
        value: Value,
    },
    /// String field equals the value after lower-casing both sides
    EqIgnoreCase {
        /// Field name
        field: String,
        /// Expected value, compared lower-cased
        value: String,
    },
    /// Every inner filter matches
    And(Vec<Filter>),
}

impl Filter {
    /// Match every document
    pub fn all() -> Self {
        Filter::All
    }

    /// Exact equality on `field`
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq { field: field.into(), value: value.into() }
    }

    /// Case-insensitive string equality on `field`
    pub fn eq_ignore_case(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::EqIgnoreCase { field: field.into(), value: value.into() }
    }

    /// Conjunction of `self` and `other`
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::And(mut left), Filter::And(right)) => {
                left.extend(right);
                Filter::And(left)
            }
            (Filter::And(mut left), f) => {
                left.push(f);
                Filter::And(left)
            }
            (f, Filter::And(mut right)) => {
                right.insert(0, f);
                Filter::And(right)
            }
            (a, b) => Filter::And(vec![a, b]),
        }
    }

    /// Evaluate the filter against a JSON document
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => document.get(field) == Some(value),
            Filter::EqIgnoreCase { field, value } => document
                .get(field)
                .and_then(Value::as_str)
                .map(|stored| stored.to_lowercase() == value.to_lowercase())
                .unwrap_or(false),
            Filter::And(filters) => filters.iter().all(|f| f.matches(document)),
        }
    }

    /// Whether any part of the filter compares case-insensitively
    pub fn ignores_case(&self) -> bool {
        match self {
            Filter::EqIgnoreCase { .. } => true,
            Filter::And(filters) => filters.iter().any(Filter::ignores_case),
            Filter::All | Filter::Eq { .. } => false,
        }
    }
}
