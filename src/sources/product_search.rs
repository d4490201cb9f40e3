//! Open Food Facts product search, used to turn a keyword into barcodes.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use super::ProductCodeResolver;
use crate::config;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    products: Vec<Value>,
}

/// [`ProductCodeResolver`] backed by the Open Food Facts search endpoint.
pub struct ProductSearchResolver {
    search_url: String,
    client: Client,
}

impl ProductSearchResolver {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_search_url(config::PRODUCT_SEARCH_URL, timeout)
    }

    pub fn with_search_url(search_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            search_url: search_url.to_string(),
            client,
        })
    }
}

impl ProductCodeResolver for ProductSearchResolver {
    fn resolve(&self, keyword: &str, max_codes: usize) -> Result<Vec<String>> {
        // Over-fetch: some hits have no code or a non-numeric one.
        let page_size = (max_codes * 4).to_string();
        let resp = self
            .client
            .get(&self.search_url)
            .query(&[
                ("search_terms", keyword),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("fields", "code"),
                ("page_size", page_size.as_str()),
            ])
            .send()?
            .error_for_status()?;
        let page: SearchPage = resp.json()?;
        let codes = distinct_codes(&page.products, max_codes);
        tracing::debug!(keyword, count = codes.len(), "resolved product codes");
        Ok(codes)
    }
}

/// Distinct all-digit `code` values in first-seen order, at most `max`.
pub fn distinct_codes(products: &[Value], max: usize) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for product in products {
        if codes.len() >= max {
            break;
        }
        let code = match product.get("code") {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => continue,
        };
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}
