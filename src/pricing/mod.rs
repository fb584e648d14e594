//! Price list API modules for HTTP fetching, catalog resolution, and data models.

pub mod catalog;
pub mod client;
pub mod error;
pub mod models;
pub mod parser;

pub use catalog::{resolve_current_version_url, Catalog};
pub use client::{PriceListFetch, PricingClient};
pub use error::PricingError;
pub use models::{OfferDetail, OfferIndex, OfferReference, PriceDimension, Product, Term, TermEntry};
