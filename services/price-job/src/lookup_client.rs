//! Price Lookup Client
//!
//! Resolves one manufacturer/part-number pair to at most `max_quotes` quotes
//! from the external product search service. Lookup never fails: a transport
//! error, timeout, non-success status or malformed body all read as
//! "nothing found".

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;

use pricecheck_models::{Quote, UNKNOWN_SHOP};
use pricecheck_utils::{LookupConfig, PriceCheckError, PriceCheckResult};

/// Source of price quotes for a part.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn lookup(&self, manufacturer: &str, part_number: &str) -> Vec<Quote>;
}

/// HTTP client for the keyed product search endpoint
pub struct PriceLookupClient {
    client: Client,
    search_url: String,
    api_key: Option<String>,
    max_quotes: usize,
}

impl PriceLookupClient {
    pub fn new(config: &LookupConfig) -> PriceCheckResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(|e| {
            PriceCheckError::configuration(format!("Failed to create lookup client: {}", e))
        })?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            api_key: config.api_key.clone(),
            max_quotes: config.max_quotes,
        })
    }

    /// Issue one search request for a free-text query
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let mut request = self
            .client
            .get(&self.search_url)
            .header("Accept", "application/json")
            .query(&[("q", query)]);
        if let Some(api_key) = &self.api_key {
            request = request.query(&[("api_key", api_key.as_str())]);
        }

        let response = request
            .send()
            .await
            .context("Failed to query price lookup service")?;

        if !response.status().is_success() {
            bail!("Price lookup service returned {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to parse price lookup response")
    }
}

#[async_trait]
impl QuoteSource for PriceLookupClient {
    async fn lookup(&self, manufacturer: &str, part_number: &str) -> Vec<Quote> {
        let query = format!("{} {}", manufacturer, part_number);

        match self.search(&query).await {
            Ok(response) => quotes_from_response(response, self.max_quotes),
            Err(e) => {
                let reason = format!("{:#}", e);
                tracing::warn!(query = %query, error = %reason, "Price lookup degraded to no quotes");
                Vec::new()
            }
        }
    }
}

/// Product search response
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_products")]
    pub products: Vec<ProductHit>,
}

/// One product returned by the search service. Fields of the wrong type read
/// as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ProductHit {
    #[serde(default, deserialize_with = "text_or_none")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub price: Option<f64>,
}

impl ProductHit {
    /// Brand, else title, else "unknown". Empty strings count as absent.
    fn shop(&self) -> &str {
        [self.brand.as_deref(), self.title.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_SHOP)
    }
}

/// Map the first `max_quotes` hits, in service order, to quotes. The price is
/// passed through untouched and the currency is always EUR.
pub fn quotes_from_response(response: SearchResponse, max_quotes: usize) -> Vec<Quote> {
    response
        .products
        .iter()
        .take(max_quotes)
        .map(|hit| Quote::new(hit.shop(), hit.price))
        .collect()
}

/// A non-array `products` reads as empty; a non-object entry reads as a hit
/// with no fields.
fn lenient_products<'de, D>(deserializer: D) -> Result<Vec<ProductHit>, D::Error>
where
    D: Deserializer<'de>,
{
    let hits = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| ProductHit::deserialize(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    };
    Ok(hits)
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn numeric_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}
