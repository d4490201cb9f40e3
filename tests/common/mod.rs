//! Shared test fixtures for the supply-risk integration tests.
//!
//! Provides in-memory [`PriceSource`] / [`ProductCodeResolver`] fakes that
//! record every call, raw upstream item builders, and `setup_direct_sdk()` which wires
//! the fakes into a [`SupplyRisk`] with pacing disabled.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use supply_risk::config::CollectorConfig;
use supply_risk::sources::{PriceSource, ProductCodeResolver};
use supply_risk::{AlertConfig, CollectStrategy, PriceRecord, SupplyRisk, SupplyRiskError};

pub type CallLog = Arc<Mutex<Vec<String>>>;

// ---------------------------------------------------------------------------
// FakePriceSource
// ---------------------------------------------------------------------------

/// Serves canned items keyed by keyword or product code.
///
/// Keys listed in `failing` return an error instead. Every call is appended
/// to `calls` as `"name:<keyword>:<size>"` or `"code:<code>:<size>"`.
#[derive(Default)]
pub struct FakePriceSource {
    pub by_name: HashMap<String, Vec<Value>>,
    pub by_code: HashMap<String, Vec<Value>>,
    pub failing: Vec<String>,
    pub calls: CallLog,
}

impl FakePriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, keyword: &str, items: Vec<Value>) -> Self {
        self.by_name.insert(keyword.to_string(), items);
        self
    }

    pub fn with_code(mut self, code: &str, items: Vec<Value>) -> Self {
        self.by_code.insert(code.to_string(), items);
        self
    }

    pub fn failing(mut self, key: &str) -> Self {
        self.failing.push(key.to_string());
        self
    }

    pub fn log(&self) -> CallLog {
        self.calls.clone()
    }

    fn serve(
        &self,
        kind: &str,
        map: &HashMap<String, Vec<Value>>,
        key: &str,
        size: usize,
    ) -> supply_risk::Result<Vec<Value>> {
        self.calls.lock().unwrap().push(format!("{}:{}:{}", kind, key, size));
        if self.failing.iter().any(|k| k == key) {
            return Err(SupplyRiskError::NotFound(format!("simulated failure for {}", key)));
        }
        Ok(map.get(key).cloned().unwrap_or_default().into_iter().take(size).collect())
    }
}

impl PriceSource for FakePriceSource {
    fn fetch_by_name(&self, keyword: &str, size: usize) -> supply_risk::Result<Vec<Value>> {
        self.serve("name", &self.by_name, keyword, size)
    }

    fn fetch_by_code(&self, code: &str, size: usize) -> supply_risk::Result<Vec<Value>> {
        self.serve("code", &self.by_code, code, size)
    }
}

// ---------------------------------------------------------------------------
// FakeResolver
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeResolver {
    pub codes: HashMap<String, Vec<String>>,
    pub fail: bool,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codes(mut self, keyword: &str, codes: &[&str]) -> Self {
        self.codes
            .insert(keyword.to_string(), codes.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn failing() -> Self {
        Self {
            codes: HashMap::new(),
            fail: true,
        }
    }
}

impl ProductCodeResolver for FakeResolver {
    fn resolve(&self, keyword: &str, max_codes: usize) -> supply_risk::Result<Vec<String>> {
        if self.fail {
            return Err(SupplyRiskError::NotFound("search unavailable".to_string()));
        }
        Ok(self
            .codes
            .get(keyword)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(max_codes)
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Raw upstream item shaped like an Open Prices `/prices` entry.
pub fn item(price: Value, currency: &str, country: &str, city: &str) -> Value {
    json!({
        "price": price,
        "currency": currency,
        "date": "2024-05-01",
        "location": {
            "osm_address_country": country,
            "osm_address_city": city
        }
    })
}

/// Items with the given prices, all in one place and currency.
pub fn items_at(prices: &[f64], currency: &str, country: &str, city: &str) -> Vec<Value> {
    prices
        .iter()
        .map(|p| item(json!(p), currency, country, city))
        .collect()
}

pub fn record(price: f64, country: &str, city: &str) -> PriceRecord {
    PriceRecord {
        price,
        currency: "EUR".to_string(),
        country: country.to_string(),
        city: city.to_string(),
        date: String::new(),
        product_code: None,
    }
}

/// Collector tuning with no pauses.
pub fn fast_collector_config() -> CollectorConfig {
    CollectorConfig {
        code_pause: Duration::ZERO,
        ..CollectorConfig::default()
    }
}

/// SDK wired to fakes, direct strategy, no pacing, no alert channels.
///
/// The caller must keep the returned `TempDir` alive for the duration of the
/// test.
pub fn setup_direct_sdk(
    source: FakePriceSource,
    commodities: &[&str],
) -> (SupplyRisk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let risk = SupplyRisk::builder()
        .strategy(CollectStrategy::Direct)
        .price_source(Box::new(source))
        .commodities(commodities)
        .commodity_pause(Duration::ZERO)
        .code_pause(Duration::ZERO)
        .alerts(AlertConfig::default())
        .data_dir(tmp_dir.path())
        .build()
        .unwrap();
    (risk, tmp_dir)
}
