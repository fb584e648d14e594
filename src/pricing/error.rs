//! Error taxonomy for catalog fetching and decoding.

/// Failures while fetching or decoding price list documents.
#[derive(thiserror::Error, Debug)]
pub enum PricingError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] wreq::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: wreq::Error,
    },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode {document}: {source}")]
    Decode {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Offer '{offer}' not found in offer index ({available} offers available)")]
    OfferNotFound { offer: String, available: usize },
}

impl PricingError {
    /// Returns true for network-level failures (transport or HTTP status).
    pub fn is_transport(&self) -> bool {
        matches!(self, PricingError::Transport { .. } | PricingError::Status { .. })
    }

    /// Returns true if the document body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, PricingError::Decode { .. })
    }
}
