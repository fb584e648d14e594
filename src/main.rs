//! pricing-crawler - Fetch the AWS Price List catalog and filter offer products

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pricing_crawler::commands::{OffersCommand, ProductsCommand, TermsCommand};
use pricing_crawler::config::{non_empty, parse_attribute, Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pricing-crawler",
    version,
    about = "Fetch the AWS Price List catalog and filter offer products",
    long_about = "Resolves an offer through the public price list offer index and prints the \
                  products matching the configured location, operating system and instance type."
)]
struct Cli {
    /// Price list API base URL
    #[arg(long, global = true, env = "PRICING_BASE_URL")]
    base_url: Option<String>,

    /// Offer name in the offer index
    #[arg(long, global = true, env = "PRICING_OFFER")]
    offer: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "PRICING_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (json, table, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print offer products matching the filters (default)
    #[command(alias = "p")]
    Products {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print the pricing terms of the offer
    #[command(alias = "t")]
    Terms {
        /// Only list terms of this type (e.g. OnDemand, Reserved)
        #[arg(long)]
        term_type: Option<String>,

        /// Only list terms of products matching the filters
        #[arg(long)]
        matching: bool,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List the offers in the offer index
    Offers,
}

#[derive(Args, Default)]
struct FilterArgs {
    /// Required `location` attribute
    #[arg(long)]
    location: Option<String>,

    /// Required `operatingSystem` attribute
    #[arg(long)]
    os: Option<String>,

    /// Required `instanceType` attribute
    #[arg(long)]
    instance_type: Option<String>,

    /// Required product family
    #[arg(long)]
    family: Option<String>,

    /// Additional required attribute (name=value, repeatable)
    #[arg(long = "attr", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Do not filter on location
    #[arg(long, conflicts_with = "location")]
    any_location: bool,

    /// Do not filter on operating system
    #[arg(long, conflicts_with = "os")]
    any_os: bool,

    /// Do not filter on instance type
    #[arg(long, conflicts_with = "instance_type")]
    any_instance_type: bool,
}

impl FilterArgs {
    fn apply(self, config: &mut Config) {
        if let Some(location) = self.location {
            config.location = Some(location);
        }
        if let Some(os) = self.os {
            config.operating_system = Some(os);
        }
        if let Some(instance_type) = self.instance_type {
            config.instance_type = Some(instance_type);
        }
        if let Some(family) = self.family {
            config.product_family = Some(family);
        }

        if self.any_location {
            config.location = None;
        }
        if self.any_os {
            config.operating_system = None;
        }
        if self.any_instance_type {
            config.instance_type = None;
        }

        config.attributes.extend(self.attributes);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only records
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(offer) = cli.offer {
        config.offer = offer;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = non_empty(proxy);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let command = cli.command.unwrap_or(Commands::Products { filters: FilterArgs::default() });

    let output = match command {
        Commands::Products { filters } => {
            filters.apply(&mut config);
            ProductsCommand::new(config).execute().await?
        }

        Commands::Terms { term_type, matching, filters } => {
            filters.apply(&mut config);
            TermsCommand::new(config).term_type(term_type).matching_only(matching).execute().await?
        }

        Commands::Offers => OffersCommand::new(config).execute().await?,
    };

    println!("{}", output);

    Ok(())
}
