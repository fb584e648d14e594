//! JSON decoding for price list documents.

use super::error::PricingError;
use super::models::{OfferDetail, OfferIndex};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Decodes an offer index document.
pub fn parse_offer_index(body: &[u8]) -> Result<OfferIndex, PricingError> {
    let index: OfferIndex = decode(body, "offer index")?;
    debug!("Parsed offer index {} with {} offers", index.publication_date, index.offers.len());
    Ok(index)
}

/// Decodes an offer detail document.
pub fn parse_offer(body: &[u8]) -> Result<OfferDetail, PricingError> {
    let offer: OfferDetail = decode(body, "offer document")?;
    debug!(
        "Parsed offer {} version {}: {} products, {} terms",
        offer.offer_code,
        offer.version,
        offer.products.len(),
        offer.term_count()
    );
    Ok(offer)
}

fn decode<T: DeserializeOwned>(body: &[u8], document: &'static str) -> Result<T, PricingError> {
    serde_json::from_slice(body).map_err(|source| PricingError::Decode { document, source })
}
