//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://pricing.us-east-1.amazonaws.com";
pub const DEFAULT_INDEX_PATH: &str = "/offers/v1.0/aws/index.json";
pub const DEFAULT_OFFER: &str = "AmazonEC2";

/// Application configuration with layered loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Price list API host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the offer index document
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Offer name to resolve in the index
    #[serde(default = "default_offer")]
    pub offer: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub proxy: Option<String>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Filter: `location` attribute
    #[serde(default = "default_location", deserialize_with = "deserialize_non_empty")]
    pub location: Option<String>,

    /// Filter: `operatingSystem` attribute
    #[serde(default = "default_operating_system", deserialize_with = "deserialize_non_empty")]
    pub operating_system: Option<String>,

    /// Filter: `instanceType` attribute
    #[serde(default = "default_instance_type", deserialize_with = "deserialize_non_empty")]
    pub instance_type: Option<String>,

    /// Filter: product family
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub product_family: Option<String>,

    /// Filter: additional attribute name/value pairs that must all match
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_index_path() -> String {
    DEFAULT_INDEX_PATH.to_string()
}

fn default_offer() -> String {
    DEFAULT_OFFER.to_string()
}

fn default_location() -> Option<String> {
    Some("US West (Oregon)".to_string())
}

fn default_operating_system() -> Option<String> {
    Some("Linux".to_string())
}

fn default_instance_type() -> Option<String> {
    Some("m2.2xlarge".to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            index_path: default_index_path(),
            offer: default_offer(),
            proxy: None,
            format: OutputFormat::Json,
            location: default_location(),
            operating_system: default_operating_system(),
            instance_type: default_instance_type(),
            product_family: None,
            attributes: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("pricing-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("PRICING_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(offer) = std::env::var("PRICING_OFFER") {
            self.offer = offer;
        }

        if let Ok(proxy) = std::env::var("PRICING_PROXY") {
            self.proxy = non_empty(proxy);
        }

        if let Ok(location) = std::env::var("PRICING_LOCATION") {
            self.location = non_empty(location);
        }

        if let Ok(os) = std::env::var("PRICING_OS") {
            self.operating_system = non_empty(os);
        }

        if let Ok(instance_type) = std::env::var("PRICING_INSTANCE_TYPE") {
            self.instance_type = non_empty(instance_type);
        }

        self
    }
}

/// Maps an empty or blank value to `None`, which disables the setting.
pub fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn deserialize_non_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.and_then(non_empty))
}

/// Joins a catalog path onto the base URL. Absolute URLs pass through unchanged.
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Parses a `name=value` attribute predicate.
pub fn parse_attribute(s: &str) -> Result<(String, String), String> {
    let (name, value) =
        s.split_once('=').ok_or_else(|| format!("Invalid attribute '{}': expected name=value", s))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Invalid attribute '{}': empty name", s));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: json, table, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
