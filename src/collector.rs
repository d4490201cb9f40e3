//! Price collection for a commodity keyword.
//!
//! Two strategies are available. `Direct` asks the price source for items whose
//! product name matches the keyword; it under-filters because many upstream
//! items carry no product name. `TwoStep` first resolves the keyword to product
//! codes and then fetches prices per exact code.
//!
//! Collaborator failures never reach the caller: a failed step contributes no
//! records and collection continues with whatever was gathered.

use serde::{Deserialize, Serialize};

use crate::config::CollectorConfig;
use crate::models::PriceRecord;
use crate::normalize;
use crate::pacing::Pacer;
use crate::sources::{PriceSource, ProductCodeResolver};

/// How keywords are turned into price records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectStrategy {
    Direct,
    #[default]
    TwoStep,
}

enum Strategy {
    Direct,
    TwoStep(Box<dyn ProductCodeResolver>),
}

/// Fetches and normalizes bounded sets of price records.
pub struct PriceCollector {
    source: Box<dyn PriceSource>,
    strategy: Strategy,
    config: CollectorConfig,
    pacer: Pacer,
}

impl PriceCollector {
    /// Collector using the product-name filter only.
    pub fn direct(source: Box<dyn PriceSource>) -> Self {
        Self::build(source, Strategy::Direct, CollectorConfig::default())
    }

    /// Collector resolving product codes first.
    pub fn two_step(
        source: Box<dyn PriceSource>,
        resolver: Box<dyn ProductCodeResolver>,
        config: CollectorConfig,
    ) -> Self {
        Self::build(source, Strategy::TwoStep(resolver), config)
    }

    fn build(source: Box<dyn PriceSource>, strategy: Strategy, config: CollectorConfig) -> Self {
        let pacer = Pacer::new(config.code_pause);
        Self {
            source,
            strategy,
            config,
            pacer,
        }
    }

    /// Replace the pacer used between per-code requests.
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn strategy(&self) -> CollectStrategy {
        match self.strategy {
            Strategy::Direct => CollectStrategy::Direct,
            Strategy::TwoStep(_) => CollectStrategy::TwoStep,
        }
    }

    /// Collect at most `target_size` normalized records for `keyword`.
    pub fn collect(&self, keyword: &str, target_size: usize) -> Vec<PriceRecord> {
        if target_size == 0 {
            return Vec::new();
        }
        match &self.strategy {
            Strategy::Direct => self.collect_direct(keyword, target_size),
            Strategy::TwoStep(resolver) => {
                self.collect_two_step(resolver.as_ref(), keyword, target_size)
            }
        }
    }

    fn collect_direct(&self, keyword: &str, target_size: usize) -> Vec<PriceRecord> {
        let items = match self.source.fetch_by_name(keyword, target_size) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(keyword, error = %e, "price fetch failed");
                return Vec::new();
            }
        };
        let mut records = normalize::normalize_items(&items);
        records.truncate(target_size);
        records
    }

    fn collect_two_step(
        &self,
        resolver: &dyn ProductCodeResolver,
        keyword: &str,
        target_size: usize,
    ) -> Vec<PriceRecord> {
        let max_codes = self.config.max_product_codes;
        let mut codes = match resolver.resolve(keyword, max_codes) {
            Ok(codes) => codes,
            Err(e) => {
                tracing::warn!(keyword, error = %e, "product code lookup failed");
                return Vec::new();
            }
        };
        dedup_in_order(&mut codes);
        codes.truncate(max_codes);
        if codes.is_empty() {
            tracing::debug!(keyword, "no product codes resolved");
            return Vec::new();
        }

        let per_code = (target_size / codes.len()).max(self.config.min_records_per_code);
        let mut records: Vec<PriceRecord> = Vec::new();
        for (i, code) in codes.iter().enumerate() {
            self.pacer.pace(i);
            match self.source.fetch_by_code(code, per_code) {
                Ok(items) => {
                    records.extend(normalize::normalize_items(&items).into_iter().map(|mut r| {
                        r.product_code = Some(code.clone());
                        r
                    }));
                }
                Err(e) => {
                    tracing::warn!(keyword, code = %code, error = %e, "price fetch by code failed");
                }
            }
            if records.len() >= target_size {
                break;
            }
        }
        records.truncate(target_size);
        records
    }
}

fn dedup_in_order(codes: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    codes.retain(|c| seen.insert(c.clone()));
}
