use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::risk::{RegionRisk, RiskAssessment, RiskStatus};

// ---------------------------------------------------------------------------
// RegionBreakdown — Ranked regions at both levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegionBreakdown {
    pub by_country: Vec<RegionRisk>,
    pub by_city: Vec<RegionRisk>,
}

// ---------------------------------------------------------------------------
// CommodityReport — Top-level per-commodity result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CommodityReport {
    pub name: String,
    pub mean_price: Option<f64>,
    #[serde(flatten)]
    pub risk: RiskAssessment,
    /// Most common currency among contributing records, or `"N/A"`.
    pub currency: String,
    pub sample_size: usize,
    pub regions: RegionBreakdown,
}

impl CommodityReport {
    pub fn risk_score(&self) -> Option<f64> {
        self.risk.risk_score()
    }

    pub fn status(&self) -> RiskStatus {
        self.risk.status()
    }
}

// ---------------------------------------------------------------------------
// Snapshot — One batch run, as persisted
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub commodities: Vec<CommodityReport>,
}
