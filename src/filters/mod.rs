//! Product filtering system with composable filters.

pub mod attribute;
pub mod family;

use crate::config::Config;
use crate::pricing::Product;

pub use attribute::AttributeFilter;
pub use family::FamilyFilter;

/// Trait for filtering products.
pub trait Filter: Send + Sync {
    /// Returns true if the product passes the filter.
    fn matches(&self, product: &Product) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a product passes all filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Returns the matching products sorted by SKU.
    pub fn apply<'p>(&self, products: impl IntoIterator<Item = &'p Product>) -> Vec<&'p Product> {
        let mut matched: Vec<&Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        matched.sort_by(|a, b| a.sku.cmp(&b.sku));
        matched
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from configuration.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Builds the chain described by the configuration's filter fields.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .location(config.location.clone())
            .operating_system(config.operating_system.clone())
            .instance_type(config.instance_type.clone())
            .product_family(config.product_family.clone())
            .attributes(config.attributes.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    /// Adds a `location` attribute filter.
    pub fn location(mut self, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.chain.add(AttributeFilter::location(value));
        }
        self
    }

    /// Adds an `operatingSystem` attribute filter.
    pub fn operating_system(mut self, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.chain.add(AttributeFilter::operating_system(value));
        }
        self
    }

    /// Adds an `instanceType` attribute filter.
    pub fn instance_type(mut self, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.chain.add(AttributeFilter::instance_type(value));
        }
        self
    }

    /// Adds a product family filter.
    pub fn product_family(mut self, family: Option<String>) -> Self {
        if let Some(family) = family {
            self.chain.add(FamilyFilter::new(family));
        }
        self
    }

    /// Adds one filter per attribute name/value pair.
    pub fn attributes(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        for (name, value) in pairs {
            self.chain.add(AttributeFilter::new(name, value));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
