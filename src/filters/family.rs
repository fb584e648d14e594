//! Product family filter.

use super::Filter;
use crate::pricing::Product;

/// Filters products by product family (e.g. "Compute Instance").
pub struct FamilyFilter {
    family: String,
}

impl FamilyFilter {
    pub fn new(family: impl Into<String>) -> Self {
        Self { family: family.into() }
    }
}

impl Filter for FamilyFilter {
    fn matches(&self, product: &Product) -> bool {
        product.product_family == self.family
    }

    fn description(&self) -> String {
        format!("Family: {}", self.family)
    }
}
