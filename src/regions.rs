//! Per-region volatility ranking.
//!
//! Records are grouped by country or by city, each sufficiently sampled group
//! is scored independently, and groups are ranked most volatile first.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::{PriceRecord, RegionRisk};
use crate::scoring;

/// Geographic key used to group records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionLevel {
    Country,
    City,
}

impl RegionLevel {
    pub fn key(&self, record: &PriceRecord) -> String {
        match self {
            RegionLevel::Country => record.country.clone(),
            RegionLevel::City => record.city_key(),
        }
    }
}

/// Filtering and truncation applied to region groups.
#[derive(Debug, Clone, Copy)]
pub struct RegionOptions {
    /// Groups with fewer prices are dropped before scoring.
    pub min_samples: usize,
    /// Maximum groups returned.
    pub limit: usize,
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self {
            min_samples: config::DEFAULT_MIN_REGION_SAMPLES,
            limit: config::DEFAULT_REGION_LIMIT,
        }
    }
}

/// Score every region at `level` and return the top `limit`, ranked.
///
/// Ranking: groups with a score come before `NO_DATA` groups, higher scores
/// first, larger samples first on equal scores. Groups are formed in
/// first-seen order, so remaining ties keep that order.
pub fn aggregate_by_region(
    records: &[PriceRecord],
    level: RegionLevel,
    options: &RegionOptions,
) -> Vec<RegionRisk> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();
    for record in records {
        let key = level.key(record);
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(record.price);
    }

    let mut rows: Vec<RegionRisk> = order
        .into_iter()
        .filter_map(|region| {
            let prices = groups.remove(&region)?;
            if prices.len() < options.min_samples {
                return None;
            }
            Some(RegionRisk {
                mean_price: scoring::mean(&prices).map(|m| scoring::round_to(m, 2)),
                risk: scoring::score(&prices),
                sample_size: prices.len(),
                region,
            })
        })
        .collect();

    rows.sort_by(rank);
    rows.truncate(options.limit);
    rows
}

fn rank(a: &RegionRisk, b: &RegionRisk) -> Ordering {
    let by_score = match (a.risk_score(), b.risk_score()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_score.then_with(|| b.sample_size.cmp(&a.sample_size))
}
