//! Product filter command implementation.

use crate::config::Config;
use crate::filters::FilterChainBuilder;
use crate::format::Formatter;
use crate::pricing::{Catalog, PriceListFetch, PricingClient};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Fetches an offer and prints the products matching the configured filters.
pub struct ProductsCommand {
    config: Config,
}

impl ProductsCommand {
    /// Creates a new products command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the command and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client = PricingClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Executes the command with a provided fetcher (for testing).
    pub async fn execute_with_client(&self, client: &impl PriceListFetch) -> Result<String> {
        let filters = FilterChainBuilder::from_config(&self.config).build();

        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
        }

        let catalog = Catalog::new(client, &self.config);
        let offer = catalog
            .offer(&self.config.offer)
            .await
            .with_context(|| format!("Failed to load offer {}", self.config.offer))?;

        let matched = filters.apply(offer.products.values());
        info!(
            "{} of {} products in {} {} match",
            matched.len(),
            offer.products.len(),
            offer.offer_code,
            offer.version
        );

        let formatter = Formatter::new(self.config.format);
        formatter.format_products(&matched).context("Failed to format products")
    }
}
