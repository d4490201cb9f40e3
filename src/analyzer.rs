//! Per-commodity analysis and the paced batch runner.

use std::collections::HashMap;

use crate::collector::PriceCollector;
use crate::config::AnalyzerConfig;
use crate::models::{CommodityReport, PriceRecord, RegionBreakdown};
use crate::pacing::Pacer;
use crate::regions::{self, RegionLevel, RegionOptions};
use crate::scoring;

/// Currency reported when no contributing record named one.
pub const UNKNOWN_CURRENCY: &str = "N/A";

/// Composes collection, scoring and region aggregation into
/// [`CommodityReport`]s.
///
/// Holds no state between calls; identical upstream data yields identical
/// reports.
pub struct CommodityAnalyzer {
    collector: PriceCollector,
    config: AnalyzerConfig,
    pacer: Pacer,
}

impl CommodityAnalyzer {
    pub fn new(collector: PriceCollector, config: AnalyzerConfig) -> Self {
        let pacer = Pacer::new(config.commodity_pause);
        Self {
            collector,
            config,
            pacer,
        }
    }

    /// Replace the pacer used between commodities.
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn collector(&self) -> &PriceCollector {
        &self.collector
    }

    /// Fetch fresh prices for `keyword` and build its report.
    pub fn analyze_commodity(&self, keyword: &str) -> CommodityReport {
        let records = self.collector.collect(keyword, self.config.sample_size);
        let report = self.report_from_records(keyword, &records);
        tracing::info!(
            commodity = keyword,
            samples = report.sample_size,
            status = %report.status(),
            "analyzed commodity"
        );
        report
    }

    /// Build a report from already collected records.
    pub fn report_from_records(&self, name: &str, records: &[PriceRecord]) -> CommodityReport {
        let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
        let options = RegionOptions {
            min_samples: self.config.min_region_samples,
            limit: self.config.region_limit,
        };

        CommodityReport {
            name: name.to_string(),
            mean_price: scoring::mean(&prices).map(|m| scoring::round_to(m, 2)),
            risk: scoring::score(&prices),
            currency: majority_currency(records).unwrap_or_else(|| UNKNOWN_CURRENCY.to_string()),
            sample_size: prices.len(),
            regions: RegionBreakdown {
                by_country: regions::aggregate_by_region(records, RegionLevel::Country, &options),
                by_city: regions::aggregate_by_region(records, RegionLevel::City, &options),
            },
        }
    }

    /// Analyze every configured commodity, in order.
    pub fn analyze_all(&self) -> Vec<CommodityReport> {
        self.analyze_many(&self.config.commodities)
    }

    /// Analyze `keywords` sequentially, pausing between calls.
    ///
    /// One report per keyword, in input order, whatever the fetch outcome.
    pub fn analyze_many<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<CommodityReport> {
        keywords
            .iter()
            .enumerate()
            .map(|(i, keyword)| {
                self.pacer.pace(i);
                self.analyze_commodity(keyword.as_ref())
            })
            .collect()
    }
}

/// Most frequent non-empty currency; ties go to the value seen first.
pub fn majority_currency(records: &[PriceRecord]) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        if record.currency.is_empty() {
            continue;
        }
        counts.entry(record.currency.as_str()).or_insert((0, idx)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(currency, _)| currency.to_string())
}
