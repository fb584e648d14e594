//! Attribute equality filtering.

use super::Filter;
use crate::pricing::models::attributes;
use crate::pricing::Product;

/// Matches products whose attribute equals an expected value.
pub struct AttributeFilter {
    name: String,
    value: String,
}

impl AttributeFilter {
    /// Creates a new attribute filter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    pub fn location(value: impl Into<String>) -> Self {
        Self::new(attributes::LOCATION, value)
    }

    pub fn operating_system(value: impl Into<String>) -> Self {
        Self::new(attributes::OPERATING_SYSTEM, value)
    }

    pub fn instance_type(value: impl Into<String>) -> Self {
        Self::new(attributes::INSTANCE_TYPE, value)
    }
}

impl Filter for AttributeFilter {
    fn matches(&self, product: &Product) -> bool {
        // Missing attribute never matches
        product.attribute(&self.name) == Some(self.value.as_str())
    }

    fn description(&self) -> String {
        format!("{} = {}", self.name, self.value)
    }
}
