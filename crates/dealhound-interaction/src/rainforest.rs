//! RainforestClient - catalog search over the Rainforest product API.
//!
//! Issues `type=search` requests against a configurable Amazon marketplace
//! and maps the raw `search_results` array into [`CatalogItem`]s. Non-success
//! responses and empty payloads are downgraded to an empty list; "no results"
//! is an answer here, not an error.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use dealhound_core::catalog::{CatalogItem, CatalogSearch};
use reqwest::Client;
use serde::Deserialize;
use std::env;

const BASE_URL: &str = "https://api.rainforestapi.com/request";
const DEFAULT_AMAZON_DOMAIN: &str = "amazon.ca";

/// Catalog search client for the Rainforest product API.
#[derive(Clone)]
pub struct RainforestClient {
    client: Client,
    api_key: String,
    amazon_domain: String,
    base_url: String,
}

impl RainforestClient {
    /// Creates a new client with the provided API key, searching the default
    /// marketplace (`amazon.ca`).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            amazon_domain: DEFAULT_AMAZON_DOMAIN.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Loads the API key from the `RAINFOREST_API_KEY` environment variable.
    pub fn try_from_env() -> Result<Self> {
        let api_key = env::var("RAINFOREST_API_KEY")
            .map_err(|_| anyhow!("RAINFOREST_API_KEY not found in environment variables"))?;
        Ok(Self::new(api_key))
    }

    /// Overrides the Amazon marketplace domain searched against.
    pub fn with_amazon_domain(mut self, domain: impl Into<String>) -> Self {
        self.amazon_domain = domain.into();
        self
    }

    /// Overrides the API endpoint, mainly for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CatalogSearch for RainforestClient {
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("type", "search"),
                ("amazon_domain", self.amazon_domain.as_str()),
                ("search_term", query),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                target: "catalog",
                status = %response.status(),
                query,
                "search request rejected"
            );
            return Ok(Vec::new());
        }

        let parsed: SearchResponse = response.json().await?;
        tracing::debug!(target: "catalog", query, results = parsed.search_results.len(), "search completed");
        Ok(parsed.search_results)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search_results: Vec<CatalogItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_representative_search_payload() {
        let json = r#"{
            "request_info": {"success": true, "credits_used": 1},
            "search_results": [
                {
                    "position": 1,
                    "title": "Apple iPhone 14 Pro Max (256GB) - Space Black",
                    "price": {"symbol": "$", "value": 1399.99, "currency": "CAD", "raw": "$1,399.99"},
                    "image": "https://m.media-amazon.com/images/I/iphone.jpg",
                    "link": "https://www.amazon.ca/dp/B0BN93DMKZ"
                },
                {
                    "position": 2,
                    "title": "iPhone 14 Pro Max Case, Clear"
                }
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.search_results.len(), 2);
        assert_eq!(parsed.search_results[0].price_value(), Some(1399.99));
        assert_eq!(parsed.search_results[1].price_value(), None);
        assert_eq!(
            parsed.search_results[1].title,
            "iPhone 14 Pro Max Case, Clear"
        );
    }

    #[test]
    fn missing_search_results_parses_as_empty() {
        let parsed: SearchResponse =
            serde_json::from_str(r#"{"request_info": {"success": false}}"#).unwrap();
        assert!(parsed.search_results.is_empty());
    }

    #[test]
    fn builders_override_domain_and_endpoint() {
        let client = RainforestClient::new("key")
            .with_amazon_domain("amazon.com")
            .with_base_url("http://localhost:9999/request");
        assert_eq!(client.amazon_domain, "amazon.com");
        assert_eq!(client.base_url, "http://localhost:9999/request");
    }
}
