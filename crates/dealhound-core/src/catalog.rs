//! Catalog search collaborator boundary.
//!
//! One raw search result per [`CatalogItem`]; items live only for the
//! duration of a single search or reconciliation cycle and are never
//! persisted.

use crate::price::parse_price_tag;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The price field of a raw search result.
///
/// Providers return either a bare number or a `{value, raw}` structure, and
/// frequently omit the field entirely (the item is then ranked as worst).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemPrice {
    Plain(f64),
    Structured {
        #[serde(default)]
        value: Option<f64>,
        #[serde(default)]
        raw: Option<String>,
    },
}

/// One element of a catalog search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: Option<ItemPrice>,
    #[serde(default, rename = "image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl CatalogItem {
    /// The numeric price of this item, if any.
    ///
    /// A structured price prefers the provider-parsed `value`; the display
    /// `raw` string is parsed as a fallback.
    pub fn price_value(&self) -> Option<f64> {
        match &self.price {
            Some(ItemPrice::Plain(value)) => Some(*value),
            Some(ItemPrice::Structured { value: Some(value), .. }) => Some(*value),
            Some(ItemPrice::Structured { value: None, raw: Some(raw) }) => parse_price_tag(raw),
            Some(ItemPrice::Structured { value: None, raw: None }) | None => None,
        }
    }
}

/// An abstract catalog search provider.
///
/// One operation: re-issue a query string and get the raw result list back.
/// Implementations must downgrade non-success responses and empty payloads to
/// an empty list; "no results" is an answer, not an error.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_structured_price() {
        let json = r#"{
            "title": "Apple iPhone 14 Pro Max (256GB) - Space Black",
            "price": {"symbol": "$", "value": 1399.99, "raw": "$1,399.99"},
            "image": "https://img.example/iphone.jpg",
            "link": "https://example.com/dp/B0XYZ"
        }"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price_value(), Some(1399.99));
        assert_eq!(item.image_url.as_deref(), Some("https://img.example/iphone.jpg"));
    }

    #[test]
    fn deserializes_plain_number_price() {
        let json = r#"{"title": "PS5 Console", "price": 649.99}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price_value(), Some(649.99));
    }

    #[test]
    fn missing_price_is_none() {
        let json = r#"{"title": "Sony WH-1000XM5", "link": "https://example.com"}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, None);
        assert_eq!(item.price_value(), None);
    }

    #[test]
    fn raw_string_is_parsed_when_value_is_absent() {
        let json = r#"{"title": "Legion 7", "price": {"raw": "$2,149.00"}}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price_value(), Some(2149.0));
    }

    #[test]
    fn unparsable_raw_string_is_none() {
        let item = CatalogItem {
            title: "mystery".to_string(),
            price: Some(ItemPrice::Structured { value: None, raw: Some("call us".to_string()) }),
            ..Default::default()
        };
        assert_eq!(item.price_value(), None);
    }

    #[test]
    fn missing_title_defaults_to_empty() {
        let json = r#"{"price": {"value": 10.0}}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.title, "");
    }
}
