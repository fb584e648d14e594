//! pricing-crawler - Fetch the AWS Price List catalog and filter offer products
//!
//! Resolves a named offer through the public offer index, decodes the offer
//! document, and selects products by attribute.

pub mod commands;
pub mod config;
pub mod filters;
pub mod format;
pub mod pricing;

pub use config::{Config, OutputFormat};
pub use pricing::{OfferDetail, OfferIndex, PricingError, Product, Term};
