//! Term listing command implementation.

use crate::config::Config;
use crate::filters::FilterChainBuilder;
use crate::format::Formatter;
use crate::pricing::{Catalog, PriceListFetch, PricingClient, TermEntry};
use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::info;

/// Fetches an offer and prints its pricing terms.
pub struct TermsCommand {
    config: Config,
    term_type: Option<String>,
    matching_only: bool,
}

impl TermsCommand {
    /// Creates a terms command that lists every term of the offer.
    pub fn new(config: Config) -> Self {
        Self { config, term_type: None, matching_only: false }
    }

    /// Restricts output to one term type (e.g. "OnDemand").
    pub fn term_type(mut self, term_type: Option<String>) -> Self {
        self.term_type = term_type;
        self
    }

    /// Restricts output to terms of products passing the configured filters.
    pub fn matching_only(mut self, enabled: bool) -> Self {
        self.matching_only = enabled;
        self
    }

    /// Executes the command and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client = PricingClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Executes the command with a provided fetcher (for testing).
    pub async fn execute_with_client(&self, client: &impl PriceListFetch) -> Result<String> {
        let catalog = Catalog::new(client, &self.config);
        let offer = catalog
            .offer(&self.config.offer)
            .await
            .with_context(|| format!("Failed to load offer {}", self.config.offer))?;

        let skus: Option<HashSet<&str>> = if self.matching_only {
            let filters = FilterChainBuilder::from_config(&self.config).build();
            let matched = filters.apply(offer.products.values());
            Some(matched.into_iter().map(|p| p.sku.as_str()).collect())
        } else {
            None
        };

        let entries: Vec<TermEntry<'_>> = offer
            .term_entries()
            .into_iter()
            .filter(|e| self.term_type.as_deref().map_or(true, |t| e.term_type == t))
            .filter(|e| skus.as_ref().map_or(true, |s| s.contains(e.term.sku.as_str())))
            .collect();

        info!("Listing {} of {} terms in {}", entries.len(), offer.term_count(), offer.offer_code);

        let formatter = Formatter::new(self.config.format);
        formatter.format_terms(&entries).context("Failed to format terms")
    }
}
