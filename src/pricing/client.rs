//! HTTP client for price list documents.

use super::error::PricingError;
use crate::config::Config;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wreq::Client;

/// Trait for fetching raw catalog documents - enables mocking for tests.
#[async_trait]
pub trait PriceListFetch: Send + Sync {
    /// Performs a GET request and returns the full response body.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PricingError>;
}

/// Price list HTTP client.
pub struct PricingClient {
    client: Client,
}

impl PricingClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self, PricingError> {
        // No total timeout: offer documents run to hundreds of megabytes.
        let mut builder =
            Client::builder().gzip(true).brotli(true).connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).map_err(PricingError::Client)?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(PricingError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PriceListFetch for PricingClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PricingError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| PricingError::Transport { url: url.to_string(), source })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(PricingError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| PricingError::Transport { url: url.to_string(), source })?;

        debug!("Read {} bytes from {}", body.len(), url);
        Ok(Vec::from(body))
    }
}
