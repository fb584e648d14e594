//! Output formatting for products, terms and offers (JSON, table, CSV).

use crate::config::OutputFormat;
use crate::pricing::models::OfferIndex;
use crate::pricing::{Product, TermEntry};
use serde::Serialize;

/// Currency shown in the table and CSV term views.
const PRICE_CURRENCY: &str = "USD";

/// Formats catalog records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[&Product]) -> serde_json::Result<String> {
        if products.is_empty() {
            return Ok(match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_line(&PRODUCT_COLUMNS),
                OutputFormat::Table => "No products found.".to_string(),
            });
        }

        match self.format {
            OutputFormat::Json => json_tabbed(products),
            OutputFormat::Table => Ok(self.table_products(products)),
            OutputFormat::Csv => Ok(self.csv_products(products)),
        }
    }

    /// Formats term records.
    pub fn format_terms(&self, terms: &[TermEntry<'_>]) -> serde_json::Result<String> {
        if terms.is_empty() {
            return Ok(match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_line(&TERM_COLUMNS),
                OutputFormat::Table => "No terms found.".to_string(),
            });
        }

        match self.format {
            OutputFormat::Json => json_tabbed(terms),
            OutputFormat::Table => Ok(self.table_terms(terms)),
            OutputFormat::Csv => Ok(self.csv_terms(terms)),
        }
    }

    /// Formats the offer listing of an index.
    pub fn format_offers(&self, index: &OfferIndex) -> serde_json::Result<String> {
        match self.format {
            OutputFormat::Json => json_tabbed(index),
            OutputFormat::Table => Ok(self.table_offers(index)),
            OutputFormat::Csv => Ok(self.csv_offers(index)),
        }
    }

    // Table formatting

    fn table_products(&self, products: &[&Product]) -> String {
        let sku_width = 16;
        let type_width = 14;
        let os_width = 10;
        let location_width = 28;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<sku_width$}  {:<type_width$}  {:<os_width$}  {:<location_width$}  {}",
            "SKU", "Instance Type", "OS", "Location", "Family"
        ));
        lines.push(format!(
            "{:-<sku_width$}  {:-<type_width$}  {:-<os_width$}  {:-<location_width$}  {:-<20}",
            "", "", "", "", ""
        ));

        for product in products {
            lines.push(format!(
                "{:<sku_width$}  {:<type_width$}  {:<os_width$}  {:<location_width$}  {}",
                product.sku,
                product.instance_type().unwrap_or("-"),
                product.operating_system().unwrap_or("-"),
                product.location().unwrap_or("-"),
                product.product_family
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    fn table_terms(&self, terms: &[TermEntry<'_>]) -> String {
        let sku_width = 16;
        let type_width = 9;
        let code_width = 12;
        let unit_width = 8;
        let price_width = 14;
        let description_width = 60;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<sku_width$}  {:<type_width$}  {:<code_width$}  {:<unit_width$}  {:>price_width$}  {}",
            "SKU", "Type", "Term", "Unit", PRICE_CURRENCY, "Description"
        ));
        lines.push(format!(
            "{:-<sku_width$}  {:-<type_width$}  {:-<code_width$}  {:-<unit_width$}  {:-<price_width$}  {:-<description_width$}",
            "", "", "", "", "", ""
        ));

        let mut rows = 0;
        for entry in terms {
            let dims = entry.term.sorted_dimensions();
            if dims.is_empty() {
                rows += 1;
                lines.push(format!(
                    "{:<sku_width$}  {:<type_width$}  {:<code_width$}  {:<unit_width$}  {:>price_width$}  {}",
                    entry.term.sku, entry.term_type, entry.term.offer_term_code, "-", "-", ""
                ));
                continue;
            }

            for dim in dims {
                rows += 1;
                lines.push(format!(
                    "{:<sku_width$}  {:<type_width$}  {:<code_width$}  {:<unit_width$}  {:>price_width$}  {}",
                    entry.term.sku,
                    entry.term_type,
                    entry.term.offer_term_code,
                    dim.unit,
                    dim.price(PRICE_CURRENCY).unwrap_or("-"),
                    truncate(&dim.description, description_width)
                ));
            }
        }

        lines.push(String::new());
        lines.push(format!("Total: {} terms ({} price dimensions)", terms.len(), rows));

        lines.join("\n")
    }

    fn table_offers(&self, index: &OfferIndex) -> String {
        let name_width = 36;

        let mut lines = Vec::new();
        lines.push(format!("{:<name_width$}  {}", "Offer", "Current Version URL"));
        lines.push(format!("{:-<name_width$}  {:-<50}", "", ""));

        for name in index.offer_names() {
            if let Some(reference) = index.offer(name) {
                lines.push(format!("{:<name_width$}  {}", name, reference.current_version_url));
            }
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {} offers (published {})",
            index.offers.len(),
            index.publication_date
        ));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_products(&self, products: &[&Product]) -> String {
        let mut lines = vec![Self::csv_line(&PRODUCT_COLUMNS)];

        for product in products {
            lines.push(Self::csv_line(&[
                product.sku.as_str(),
                product.product_family.as_str(),
                product.location().unwrap_or_default(),
                product.operating_system().unwrap_or_default(),
                product.instance_type().unwrap_or_default(),
            ]));
        }

        lines.join("\n")
    }

    fn csv_terms(&self, terms: &[TermEntry<'_>]) -> String {
        let mut lines = vec![Self::csv_line(&TERM_COLUMNS)];

        for entry in terms {
            let dims = entry.term.sorted_dimensions();
            if dims.is_empty() {
                lines.push(Self::csv_line(&[
                    entry.term.sku.as_str(),
                    entry.term_type,
                    entry.term.offer_term_code.as_str(),
                    entry.term.effective_date.as_str(),
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                ]));
                continue;
            }

            for dim in dims {
                lines.push(Self::csv_line(&[
                    entry.term.sku.as_str(),
                    entry.term_type,
                    entry.term.offer_term_code.as_str(),
                    entry.term.effective_date.as_str(),
                    dim.rate_code.as_str(),
                    dim.unit.as_str(),
                    dim.starting_range.as_str(),
                    dim.ending_range.as_str(),
                    dim.price(PRICE_CURRENCY).unwrap_or_default(),
                    dim.description.as_str(),
                ]));
            }
        }

        lines.join("\n")
    }

    fn csv_offers(&self, index: &OfferIndex) -> String {
        let mut lines = vec![Self::csv_line(&["offer", "offer_code", "current_version_url"])];

        for name in index.offer_names() {
            if let Some(reference) = index.offer(name) {
                lines.push(Self::csv_line(&[
                    name,
                    reference.offer_code.as_str(),
                    reference.current_version_url.as_str(),
                ]));
            }
        }

        lines.join("\n")
    }

    fn csv_line(fields: &[&str]) -> String {
        fields.iter().map(|f| Self::csv_escape(f)).collect::<Vec<_>>().join(",")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

const PRODUCT_COLUMNS: [&str; 5] =
    ["sku", "product_family", "location", "operating_system", "instance_type"];

const TERM_COLUMNS: [&str; 10] = [
    "sku",
    "term_type",
    "term_code",
    "effective_date",
    "rate_code",
    "unit",
    "starting_range",
    "ending_range",
    "price_usd",
    "description",
];

/// Pretty-prints JSON with tab indentation.
pub fn json_tabbed<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{OfferReference, PriceDimension, Term};
    use std::collections::HashMap;

    fn make_product() -> Product {
        Product {
            sku: "4C7N4APU9GEUZ6H6".to_string(),
            product_family: "Compute Instance".to_string(),
            attributes: HashMap::from([
                ("location".to_string(), "US West (Oregon)".to_string()),
                ("operatingSystem".to_string(), "Linux".to_string()),
                ("instanceType".to_string(), "m2.2xlarge".to_string()),
            ]),
        }
    }

    fn make_term() -> Term {
        Term {
            offer_term_code: "JRTCKXETXF".to_string(),
            sku: "4C7N4APU9GEUZ6H6".to_string(),
            effective_date: "2024-01-01T00:00:00Z".to_string(),
            term_attributes_type: None,
            term_attributes: HashMap::new(),
            price_dimensions: HashMap::from([(
                "4C7N4APU9GEUZ6H6.JRTCKXETXF.6YS6EN2CT7".to_string(),
                PriceDimension {
                    rate_code: "4C7N4APU9GEUZ6H6.JRTCKXETXF.6YS6EN2CT7".to_string(),
                    description: "$0.49 per On Demand Linux m2.2xlarge Instance Hour, billed".to_string(),
                    unit: "Hrs".to_string(),
                    starting_range: "0".to_string(),
                    ending_range: "Inf".to_string(),
                    price_per_unit: HashMap::from([("USD".to_string(), "0.4900000000".to_string())]),
                },
            )]),
        }
    }

    fn make_index() -> OfferIndex {
        let reference = |code: &str| OfferReference {
            offer_code: code.to_string(),
            version_index_url: format!("/offers/v1.0/aws/{}/index.json", code),
            current_version_url: format!("/offers/v1.0/aws/{}/current/index.json", code),
            current_region_index_url: None,
        };

        OfferIndex {
            format_version: "v1.0".to_string(),
            disclaimer: String::new(),
            publication_date: "2024-01-01T00:00:00Z".to_string(),
            offers: HashMap::from([
                ("AmazonS3".to_string(), reference("AmazonS3")),
                ("AmazonEC2".to_string(), reference("AmazonEC2")),
            ]),
        }
    }

    #[test]
    fn test_json_single_product_is_tab_indented() {
        let formatter = Formatter::new(OutputFormat::Json);
        let product = make_product();
        let output = formatter.format_products(&[&product]).unwrap();

        assert!(output.starts_with("[\n\t{"));
        assert!(output.contains("\n\t\t\"sku\": \"4C7N4APU9GEUZ6H6\""));
        assert!(output.contains("\"productFamily\": \"Compute Instance\""));

        let parsed: Vec<Product> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, vec![product]);
    }

    #[test]
    fn test_json_attributes_sorted() {
        let output = json_tabbed(&make_product()).unwrap();
        let instance = output.find("instanceType").unwrap();
        let location = output.find("location").unwrap();
        let os = output.find("operatingSystem").unwrap();
        assert!(instance < location && location < os);
    }

    #[test]
    fn test_json_tabbed_reports_serialization_errors() {
        // JSON object keys must be strings
        let value = HashMap::from([((1, 2), "x")]);
        assert!(json_tabbed(&value).is_err());
    }

    #[test]
    fn test_empty_products() {
        assert_eq!(Formatter::new(OutputFormat::Json).format_products(&[]).unwrap(), "[]");
        assert_eq!(
            Formatter::new(OutputFormat::Table).format_products(&[]).unwrap(),
            "No products found."
        );
        assert_eq!(
            Formatter::new(OutputFormat::Csv).format_products(&[]).unwrap(),
            "sku,product_family,location,operating_system,instance_type"
        );
    }

    #[test]
    fn test_table_products() {
        let product = make_product();
        let output = Formatter::new(OutputFormat::Table).format_products(&[&product]).unwrap();

        assert!(output.contains("SKU"));
        assert!(output.contains("4C7N4APU9GEUZ6H6"));
        assert!(output.contains("m2.2xlarge"));
        assert!(output.contains("US West (Oregon)"));
        assert!(output.contains("Total: 1 products"));
    }

    #[test]
    fn test_csv_products_escapes_commas() {
        let mut product = make_product();
        product.attributes.insert("location".to_string(), "Asia Pacific (Osaka, Local)".to_string());

        let output = Formatter::new(OutputFormat::Csv).format_products(&[&product]).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "4C7N4APU9GEUZ6H6,Compute Instance,\"Asia Pacific (Osaka, Local)\",Linux,m2.2xlarge"
        );
    }

    #[test]
    fn test_json_terms() {
        let term = make_term();
        let entries = [TermEntry { term_type: "OnDemand", term: &term }];

        let output = Formatter::new(OutputFormat::Json).format_terms(&entries).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["termType"], "OnDemand");
        assert_eq!(parsed[0]["offerTermCode"], "JRTCKXETXF");
        assert_eq!(
            parsed[0]["priceDimensions"]["4C7N4APU9GEUZ6H6.JRTCKXETXF.6YS6EN2CT7"]["pricePerUnit"]["USD"],
            "0.4900000000"
        );
    }

    #[test]
    fn test_table_terms() {
        let term = make_term();
        let entries = [TermEntry { term_type: "OnDemand", term: &term }];

        let output = Formatter::new(OutputFormat::Table).format_terms(&entries).unwrap();
        assert!(output.contains("OnDemand"));
        assert!(output.contains("0.4900000000"));
        assert!(output.contains("Hrs"));
        assert!(output.contains("Total: 1 terms (1 price dimensions)"));
    }

    #[test]
    fn test_csv_terms() {
        let term = make_term();
        let entries = [TermEntry { term_type: "OnDemand", term: &term }];

        let output = Formatter::new(OutputFormat::Csv).format_terms(&entries).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("sku,term_type,term_code"));
        assert!(lines[1].starts_with("4C7N4APU9GEUZ6H6,OnDemand,JRTCKXETXF,"));
        // Description contains a comma and is quoted
        assert!(lines[1].ends_with("\"$0.49 per On Demand Linux m2.2xlarge Instance Hour, billed\""));
    }

    #[test]
    fn test_csv_terms_without_price_dimensions() {
        let priced = make_term();
        let mut one_year = make_term();
        one_year.offer_term_code = "4NA7Y494T4".to_string();
        one_year.price_dimensions.clear();
        let mut three_year = make_term();
        three_year.offer_term_code = "38NPMPTW36".to_string();
        three_year.price_dimensions.clear();

        let entries = [
            TermEntry { term_type: "OnDemand", term: &priced },
            TermEntry { term_type: "Reserved", term: &three_year },
            TermEntry { term_type: "Reserved", term: &one_year },
        ];

        let output = Formatter::new(OutputFormat::Csv).format_terms(&entries).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        // Header plus one row per term
        assert_eq!(lines.len(), 1 + entries.len());
        assert_eq!(
            lines[2],
            "4C7N4APU9GEUZ6H6,Reserved,38NPMPTW36,2024-01-01T00:00:00Z,,,,,,"
        );
        assert_eq!(
            lines[3],
            "4C7N4APU9GEUZ6H6,Reserved,4NA7Y494T4,2024-01-01T00:00:00Z,,,,,,"
        );
    }

    #[test]
    fn test_empty_terms() {
        assert_eq!(Formatter::new(OutputFormat::Json).format_terms(&[]).unwrap(), "[]");
        assert_eq!(Formatter::new(OutputFormat::Table).format_terms(&[]).unwrap(), "No terms found.");
    }

    #[test]
    fn test_table_offers_sorted() {
        let output = Formatter::new(OutputFormat::Table).format_offers(&make_index()).unwrap();

        let ec2 = output.find("AmazonEC2").unwrap();
        let s3 = output.find("AmazonS3").unwrap();
        assert!(ec2 < s3);
        assert!(output.contains("/offers/v1.0/aws/AmazonEC2/current/index.json"));
        assert!(output.contains("Total: 2 offers"));
    }

    #[test]
    fn test_csv_offers() {
        let output = Formatter::new(OutputFormat::Csv).format_offers(&make_index()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "offer,offer_code,current_version_url");
        assert_eq!(lines[1], "AmazonEC2,AmazonEC2,/offers/v1.0/aws/AmazonEC2/current/index.json");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long description", 10), "a long ...");
    }
}
