//! Offer index listing command.

use crate::config::Config;
use crate::format::Formatter;
use crate::pricing::{Catalog, PriceListFetch, PricingClient};
use anyhow::{Context, Result};
use tracing::info;

/// Lists the offers published in the offer index.
pub struct OffersCommand {
    config: Config,
}

impl OffersCommand {
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
        let catalog = Catalog::new(client, &self.config);
        let index = catalog.offer_index().await.context("Failed to load offer index")?;

        info!("Offer index lists {} offers", index.offers.len());

        let formatter = Formatter::new(self.config.format);
        formatter.format_offers(&index).context("Failed to format offer index")
    }
}
