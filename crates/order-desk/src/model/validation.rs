//! Collected field errors from a failed validation.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// One failed rule on one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    /// `"Product count must be in 1..100"`.
    pub fn full_message(&self) -> String {
        format!("{} {}", humanize(self.field), self.reason)
    }
}

/// Every rule that failed, in the order the attributes were checked.
///
/// Serializes as `{"field": ["reason", ...]}`, which is what JSON clients receive with a 422.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, reason: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Reasons recorded against `field`.
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.reason.as_str())
            .collect()
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(FieldError::full_message).collect()
    }

    pub fn by_field(&self) -> BTreeMap<&'static str, Vec<&str>> {
        let mut map: BTreeMap<&'static str, Vec<&str>> = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field).or_default().push(&error.reason);
        }
        map
    }

    /// `Ok(value)` when nothing failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.by_field())
    }
}

/// `product_count` -> `Product count`, `customer_id` -> `Customer`.
fn humanize(field: &str) -> String {
    let base = field.strip_suffix("_id").unwrap_or(field).replace('_', " ");
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.add("product_name", "can't be blank");
        errors.add("customer_id", "must exist");
        errors
    }

    #[test]
    fn test_full_messages_humanize_attribute_names() {
        assert_eq!(
            sample().full_messages(),
            vec!["Product name can't be blank", "Customer must exist"]
        );
        assert_eq!(
            sample().to_string(),
            "Product name can't be blank, Customer must exist"
        );
    }

    #[test]
    fn test_serializes_grouped_by_field() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "customer_id": ["must exist"],
                "product_name": ["can't be blank"],
            })
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(5), Ok(5));
        assert!(sample().into_result(5).is_err());
        assert_eq!(sample().on("customer_id"), vec!["must exist"]);
        assert!(sample().on("product_count").is_empty());
    }
}
