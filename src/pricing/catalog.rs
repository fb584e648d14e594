//! Two-stage catalog resolution: offer index, then the named offer document.

use super::client::PriceListFetch;
use super::error::PricingError;
use super::models::{OfferDetail, OfferIndex};
use super::parser;
use crate::config::{join_url, Config};
use tracing::info;

/// Resolves offers through the offer index using a fetcher.
pub struct Catalog<'a, F: PriceListFetch + ?Sized> {
    fetcher: &'a F,
    base_url: String,
    index_path: String,
}

impl<'a, F: PriceListFetch + ?Sized> Catalog<'a, F> {
    /// Creates a catalog rooted at the configured base URL.
    pub fn new(fetcher: &'a F, config: &Config) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            index_path: config.index_path.clone(),
        }
    }

    /// Full URL of the offer index document.
    pub fn index_url(&self) -> String {
        join_url(&self.base_url, &self.index_path)
    }

    /// Fetches and decodes the offer index.
    pub async fn offer_index(&self) -> Result<OfferIndex, PricingError> {
        let url = self.index_url();
        info!("Fetching offer index: {}", url);

        let body = self.fetcher.fetch(&url).await?;
        parser::parse_offer_index(&body)
    }

    /// Fetches and decodes the current version of a named offer.
    pub async fn offer(&self, name: &str) -> Result<OfferDetail, PricingError> {
        let index = self.offer_index().await?;
        self.offer_from_index(&index, name).await
    }

    /// Fetches the current version of a named offer from an already decoded index.
    pub async fn offer_from_index(
        &self,
        index: &OfferIndex,
        name: &str,
    ) -> Result<OfferDetail, PricingError> {
        let path = resolve_current_version_url(index, name)?;
        let url = join_url(&self.base_url, path);
        info!("Fetching offer {}: {}", name, url);

        let body = self.fetcher.fetch(&url).await?;
        parser::parse_offer(&body)
    }
}

/// Returns the current version URL of a named offer.
pub fn resolve_current_version_url<'i>(
    index: &'i OfferIndex,
    name: &str,
) -> Result<&'i str, PricingError> {
    match index.offer(name) {
        Some(reference) if !reference.current_version_url.is_empty() => {
            Ok(reference.current_version_url.as_str())
        }
        _ => Err(PricingError::OfferNotFound {
            offer: name.to_string(),
            available: index.offers.len(),
        }),
    }
}
