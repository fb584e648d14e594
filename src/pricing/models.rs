//! Data models for the price list offer index and offer documents.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Term type -> SKU -> term code -> term.
pub type TermsBySku = HashMap<String, HashMap<String, HashMap<String, Term>>>;

/// Top-level offer index listing every published offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferIndex {
    /// Document format version
    #[serde(default)]
    pub format_version: String,
    /// Legal disclaimer text
    #[serde(default)]
    pub disclaimer: String,
    /// Publication timestamp
    #[serde(default)]
    pub publication_date: String,
    /// Offer name (e.g. "AmazonEC2") to reference
    #[serde(default, serialize_with = "sorted_map")]
    pub offers: HashMap<String, OfferReference>,
}

impl OfferIndex {
    /// Looks up an offer reference by name.
    pub fn offer(&self, name: &str) -> Option<&OfferReference> {
        self.offers.get(name)
    }

    /// Returns offer names in sorted order.
    pub fn offer_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.offers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Pointer from the offer index to one offer's documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferReference {
    #[serde(rename = "offerCode", default)]
    pub offer_code: String,
    #[serde(rename = "versionIndexUrl", alias = "versionIndexURL", default)]
    pub version_index_url: String,
    /// Path of the latest offer document
    #[serde(rename = "currentVersionUrl", alias = "currentVersionURL", default)]
    pub current_version_url: String,
    #[serde(
        rename = "currentRegionIndexUrl",
        alias = "currentRegionIndexURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_region_index_url: Option<String>,
}

/// A fetched offer document: products plus their pricing terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetail {
    #[serde(default)]
    pub format_version: String,
    #[serde(default)]
    pub disclaimer: String,
    #[serde(default)]
    pub offer_code: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub publication_date: String,
    #[serde(default)]
    pub products: HashMap<String, Product>,
    #[serde(default)]
    pub terms: TermsBySku,
}

impl OfferDetail {
    /// Returns every term paired with its term type, sorted by term type,
    /// SKU and term code.
    pub fn term_entries(&self) -> Vec<TermEntry<'_>> {
        let mut entries: Vec<TermEntry<'_>> = self
            .terms
            .iter()
            .flat_map(|(term_type, by_sku)| {
                by_sku.values().flat_map(move |by_code| {
                    by_code
                        .values()
                        .map(move |term| TermEntry { term_type: term_type.as_str(), term })
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            (a.term_type, &a.term.sku, &a.term.offer_term_code).cmp(&(
                b.term_type,
                &b.term.sku,
                &b.term.offer_term_code,
            ))
        });
        entries
    }

    /// Total number of terms across all term types and SKUs.
    pub fn term_count(&self) -> usize {
        self.terms.values().flat_map(|by_sku| by_sku.values()).map(HashMap::len).sum()
    }
}

/// A priced product variant identified by SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stock-keeping unit
    pub sku: String,
    /// Product family (e.g. "Compute Instance")
    #[serde(default)]
    pub product_family: String,
    /// Attribute name to value
    #[serde(default, serialize_with = "sorted_map")]
    pub attributes: HashMap<String, String>,
}

impl Product {
    /// Returns an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn location(&self) -> Option<&str> {
        self.attribute(attributes::LOCATION)
    }

    pub fn operating_system(&self) -> Option<&str> {
        self.attribute(attributes::OPERATING_SYSTEM)
    }

    pub fn instance_type(&self) -> Option<&str> {
        self.attribute(attributes::INSTANCE_TYPE)
    }
}

/// Well-known product attribute names.
pub mod attributes {
    pub const LOCATION: &str = "location";
    pub const OPERATING_SYSTEM: &str = "operatingSystem";
    pub const INSTANCE_TYPE: &str = "instanceType";
}

/// A pricing term attached to one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub offer_term_code: String,
    pub sku: String,
    #[serde(default)]
    pub effective_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_attributes_type: Option<String>,
    #[serde(default, serialize_with = "sorted_map")]
    pub term_attributes: HashMap<String, String>,
    #[serde(default, serialize_with = "sorted_map")]
    pub price_dimensions: HashMap<String, PriceDimension>,
}

impl Term {
    /// Returns price dimensions sorted by rate code.
    pub fn sorted_dimensions(&self) -> Vec<&PriceDimension> {
        let mut dims: Vec<&PriceDimension> = self.price_dimensions.values().collect();
        dims.sort_by(|a, b| a.rate_code.cmp(&b.rate_code));
        dims
    }
}

/// One priced unit within a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDimension {
    pub rate_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    /// Range bounds are kept as strings ("0", "Inf")
    #[serde(default)]
    pub starting_range: String,
    #[serde(default)]
    pub ending_range: String,
    /// Currency code to price
    #[serde(default, serialize_with = "sorted_map")]
    pub price_per_unit: HashMap<String, String>,
}

impl PriceDimension {
    /// Returns the price for a currency code.
    pub fn price(&self, currency: &str) -> Option<&str> {
        self.price_per_unit.get(currency).map(String::as_str)
    }
}

// Serializes a map with keys in sorted order so output is stable.
fn sorted_map<S, V>(map: &HashMap<String, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    map.iter().collect::<BTreeMap<_, _>>().serialize(serializer)
}

/// A term together with the term type it was listed under.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermEntry<'a> {
    pub term_type: &'a str,
    #[serde(flatten)]
    pub term: &'a Term,
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFER_JSON: &str = r#"{
        "formatVersion": "v1.0",
        "disclaimer": "test",
        "offerCode": "AmazonEC2",
        "version": "20240101000000",
        "publicationDate": "2024-01-01T00:00:00Z",
        "products": {
            "SKU1": {
                "sku": "SKU1",
                "productFamily": "Compute Instance",
                "attributes": {"location": "US West (Oregon)", "operatingSystem": "Linux", "instanceType": "m2.2xlarge"}
            }
        },
        "terms": {
            "OnDemand": {
                "SKU1": {
                    "SKU1.JRTCKXETXF": {
                        "offerTermCode": "JRTCKXETXF",
                        "sku": "SKU1",
                        "effectiveDate": "2024-01-01T00:00:00Z",
                        "priceDimensions": {
                            "SKU1.JRTCKXETXF.6YS6EN2CT7": {
                                "rateCode": "SKU1.JRTCKXETXF.6YS6EN2CT7",
                                "description": "$0.49 per On Demand Linux m2.2xlarge Instance Hour",
                                "unit": "Hrs",
                                "startingRange": "0",
                                "endingRange": "Inf",
                                "pricePerUnit": {"USD": "0.4900000000"},
                                "appliesTo": []
                            }
                        },
                        "termAttributes": {}
                    }
                }
            },
            "Reserved": {
                "SKU1": {
                    "SKU1.4NA7Y494T4": {
                        "offerTermCode": "4NA7Y494T4",
                        "sku": "SKU1",
                        "effectiveDate": "2024-01-01T00:00:00Z",
                        "termAttributes": {"LeaseContractLength": "1yr", "PurchaseOption": "No Upfront"}
                    }
                }
            }
        }
    }"#;

    #[test]
    fn test_offer_detail_decode() {
        let offer: OfferDetail = serde_json::from_str(OFFER_JSON).unwrap();
        assert_eq!(offer.offer_code, "AmazonEC2");
        assert_eq!(offer.products.len(), 1);

        let product = &offer.products["SKU1"];
        assert_eq!(product.product_family, "Compute Instance");
        assert_eq!(product.location(), Some("US West (Oregon)"));
        assert_eq!(product.operating_system(), Some("Linux"));
        assert_eq!(product.instance_type(), Some("m2.2xlarge"));
        assert_eq!(product.attribute("tenancy"), None);

        assert_eq!(offer.term_count(), 2);
        let term = &offer.terms["OnDemand"]["SKU1"]["SKU1.JRTCKXETXF"];
        let dim = &term.price_dimensions["SKU1.JRTCKXETXF.6YS6EN2CT7"];
        assert_eq!(dim.unit, "Hrs");
        assert_eq!(dim.ending_range, "Inf");
        assert_eq!(dim.price("USD"), Some("0.4900000000"));
        assert_eq!(dim.price("EUR"), None);
    }

    #[test]
    fn test_term_entries_sorted() {
        let offer: OfferDetail = serde_json::from_str(OFFER_JSON).unwrap();
        let entries = offer.term_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].term_type, "OnDemand");
        assert_eq!(entries[1].term_type, "Reserved");
        assert!(entries[1].term.price_dimensions.is_empty());
    }

    #[test]
    fn test_term_entry_serializes_flat() {
        let offer: OfferDetail = serde_json::from_str(OFFER_JSON).unwrap();
        let entries = offer.term_entries();
        let value = serde_json::to_value(entries[0]).unwrap();
        assert_eq!(value["termType"], "OnDemand");
        assert_eq!(value["offerTermCode"], "JRTCKXETXF");
        assert_eq!(value["sku"], "SKU1");
    }

    #[test]
    fn test_offer_reference_accepts_both_url_spellings() {
        let lower: OfferReference = serde_json::from_str(
            r#"{"offerCode": "AmazonEC2", "versionIndexUrl": "/v", "currentVersionUrl": "/c"}"#,
        )
        .unwrap();
        let upper: OfferReference = serde_json::from_str(
            r#"{"offerCode": "AmazonEC2", "versionIndexURL": "/v", "currentVersionURL": "/c"}"#,
        )
        .unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower.current_version_url, "/c");
        assert!(lower.current_region_index_url.is_none());
    }

    #[test]
    fn test_offer_names_sorted() {
        let index: OfferIndex = serde_json::from_str(
            r#"{"offers": {
                "AmazonS3": {"offerCode": "AmazonS3", "currentVersionUrl": "/s3"},
                "AmazonEC2": {"offerCode": "AmazonEC2", "currentVersionUrl": "/ec2"}
            }}"#,
        )
        .unwrap();

        assert_eq!(index.offer_names(), vec!["AmazonEC2", "AmazonS3"]);
        assert_eq!(index.offer("AmazonS3").unwrap().current_version_url, "/s3");
        assert!(index.offer("AWSLambda").is_none());
    }

    #[test]
    fn test_product_wrong_attribute_type() {
        let result = serde_json::from_str::<Product>(
            r#"{"sku": "SKU1", "productFamily": "Compute Instance", "attributes": {"vcpu": 8}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_product_json_roundtrip_keeps_attributes() {
        let offer: OfferDetail = serde_json::from_str(OFFER_JSON).unwrap();
        let product = &offer.products["SKU1"];

        let text = serde_json::to_string_pretty(product).unwrap();
        let parsed: Product = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed.attributes, product.attributes);
        assert_eq!(&parsed, product);
    }
}
