//! Consumers of [`CommodityReport`] lists: snapshots, severity selection,
//! comparisons and alert text.

use std::fmt::Write as _;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{CommodityReport, RiskStatus, Snapshot};

impl Snapshot {
    /// Stamp a batch result with the current UTC time.
    pub fn new(commodities: Vec<CommodityReport>) -> Self {
        Self {
            timestamp: Utc::now(),
            commodities,
        }
    }
}

// ---------------------------------------------------------------------------
// SeverityFilter
// ---------------------------------------------------------------------------

/// Which tiers a notification covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityFilter {
    #[default]
    Critical,
    CriticalAndWarning,
}

impl SeverityFilter {
    pub fn from_include_warnings(include_warnings: bool) -> Self {
        if include_warnings {
            SeverityFilter::CriticalAndWarning
        } else {
            SeverityFilter::Critical
        }
    }

    pub fn includes(&self, status: RiskStatus) -> bool {
        match self {
            SeverityFilter::Critical => status == RiskStatus::Critical,
            SeverityFilter::CriticalAndWarning => status.is_alertable(),
        }
    }

    /// Reports matching this filter, in their original order.
    pub fn select(&self, reports: &[CommodityReport]) -> Vec<CommodityReport> {
        reports
            .iter()
            .filter(|r| self.includes(r.status()))
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub critical_count: usize,
    pub warning_count: usize,
    pub stable_count: usize,
    pub highest_risk: Option<CommodityReport>,
}

/// Side-by-side risk summary for several commodities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub commodities: Vec<CommodityReport>,
    pub summary: ComparisonSummary,
}

impl Comparison {
    pub fn new(commodities: Vec<CommodityReport>) -> Self {
        let count = |status: RiskStatus| {
            commodities
                .iter()
                .filter(|c| c.status() == status)
                .count()
        };
        let summary = ComparisonSummary {
            critical_count: count(RiskStatus::Critical),
            warning_count: count(RiskStatus::Warning),
            stable_count: count(RiskStatus::Stable),
            highest_risk: highest_risk(&commodities).cloned(),
        };
        Self {
            commodities,
            summary,
        }
    }
}

/// First report with the largest score; a missing score counts as zero.
pub fn highest_risk(reports: &[CommodityReport]) -> Option<&CommodityReport> {
    let mut best: Option<(&CommodityReport, f64)> = None;
    for report in reports {
        let score = report.risk_score().unwrap_or(0.0);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((report, score)),
        }
    }
    best.map(|(r, _)| r)
}

// ---------------------------------------------------------------------------
// Alert text
// ---------------------------------------------------------------------------

pub const ALERT_TITLE: &str = "Supply Chain Resilience Alert";
pub const ALERT_SUBJECT: &str = "Supply Chain Resilience Alert - CRITICAL Risk Detected";

/// Plain-text alert body listing the reports `filter` admits.
pub fn format_alert_body(reports: &[CommodityReport], filter: SeverityFilter) -> String {
    let mut body = format!("{}\n{}\n", ALERT_TITLE, "=".repeat(30));
    for report in reports.iter().filter(|r| filter.includes(r.status())) {
        let risk = report
            .risk_score()
            .map(|s| format!("{:.4}", s))
            .unwrap_or_else(|| "N/A".to_string());
        let avg = report
            .mean_price
            .map(|m| format!("{:.2} {}", m, report.currency))
            .unwrap_or_else(|| "N/A".to_string());
        let _ = write!(
            body,
            "\n- {}: {} (risk={}, avg={}, n={})",
            report.name,
            report.status(),
            risk,
            avg,
            report.sample_size
        );
    }
    body
}
