//! Open Prices API client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use super::PriceSource;
use crate::config;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct PricesPage {
    #[serde(default)]
    items: Option<Vec<Value>>,
}

/// [`PriceSource`] backed by the Open Prices `/prices` endpoint.
pub struct OpenPricesSource {
    base_url: String,
    client: Client,
}

impl OpenPricesSource {
    /// Create a client against the public API with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(config::PRICES_API_BASE, timeout)
    }

    /// Create a client against an alternative `/prices` URL.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_items(&self, filter: (&str, &str), size: usize) -> Result<Vec<Value>> {
        let size = size.to_string();
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[filter, ("size", size.as_str()), ("sort", "-date")])
            .send()?
            .error_for_status()?;
        let page: PricesPage = resp.json()?;
        let items = page.items.unwrap_or_default();
        tracing::debug!(filter = filter.0, value = filter.1, count = items.len(), "fetched prices");
        Ok(items)
    }
}

impl PriceSource for OpenPricesSource {
    fn fetch_by_name(&self, keyword: &str, size: usize) -> Result<Vec<Value>> {
        self.get_items(("product_name__like", keyword), size)
    }

    fn fetch_by_code(&self, code: &str, size: usize) -> Result<Vec<Value>> {
        self.get_items(("product_code", code), size)
    }
}
