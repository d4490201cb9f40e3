use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scoring;

// ---------------------------------------------------------------------------
// RiskStatus — Severity tier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskStatus {
    Critical,
    Warning,
    Stable,
    NoData,
}

impl RiskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::Critical => "CRITICAL",
            RiskStatus::Warning => "WARNING",
            RiskStatus::Stable => "STABLE",
            RiskStatus::NoData => "NO_DATA",
        }
    }

    /// Whether this tier is ever worth notifying about.
    pub fn is_alertable(&self) -> bool {
        matches!(self, RiskStatus::Critical | RiskStatus::Warning)
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RiskAssessment — Score + tier for any set of prices
// ---------------------------------------------------------------------------

/// Volatility score and tier for a set of prices.
///
/// `status` is `NoData` exactly when `risk_score` is `None`, and otherwise is
/// the tier of the score. Values are built with [`from_cv`](Self::from_cv) or
/// [`no_data`](Self::no_data); deserialization rejects inconsistent pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAssessment")]
pub struct RiskAssessment {
    risk_score: Option<f64>,
    status: RiskStatus,
}

#[derive(Deserialize)]
struct RawAssessment {
    risk_score: Option<f64>,
    status: RiskStatus,
}

impl TryFrom<RawAssessment> for RiskAssessment {
    type Error = String;

    fn try_from(raw: RawAssessment) -> Result<Self, Self::Error> {
        match (raw.risk_score, raw.status) {
            (None, RiskStatus::NoData) => Ok(Self::no_data()),
            (None, status) => Err(format!("status {} requires a risk_score", status)),
            (Some(score), RiskStatus::NoData) => {
                Err(format!("status NO_DATA must not carry risk_score {}", score))
            }
            (Some(score), status) => {
                if !score.is_finite() || score < 0.0 {
                    return Err(format!("invalid risk_score {}", score));
                }
                // The stored score is rounded; the tier came from the raw value.
                let half_step = 0.5 * 10f64.powi(-scoring::SCORE_PRECISION);
                let low = scoring::classify(score - half_step);
                let high = scoring::classify(score + half_step);
                if status != low && status != high {
                    return Err(format!("status {} does not match risk_score {}", status, score));
                }
                Ok(Self {
                    risk_score: Some(score),
                    status,
                })
            }
        }
    }
}

impl RiskAssessment {
    /// Assessment for a coefficient of variation: tiered on the raw value,
    /// reported rounded. A negative or non-finite value has no data.
    pub fn from_cv(cv: f64) -> Self {
        if !cv.is_finite() || cv < 0.0 {
            return Self::no_data();
        }
        Self {
            risk_score: Some(scoring::round_to(cv, scoring::SCORE_PRECISION)),
            status: scoring::classify(cv),
        }
    }

    pub fn no_data() -> Self {
        Self {
            risk_score: None,
            status: RiskStatus::NoData,
        }
    }

    pub fn risk_score(&self) -> Option<f64> {
        self.risk_score
    }

    pub fn status(&self) -> RiskStatus {
        self.status
    }
}

// ---------------------------------------------------------------------------
// RegionRisk — Assessment scoped to one geographic group
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegionRisk {
    /// Country name, or `"{city}, {country}"` at city level.
    pub region: String,
    pub mean_price: Option<f64>,
    #[serde(flatten)]
    pub risk: RiskAssessment,
    pub sample_size: usize,
}

impl RegionRisk {
    pub fn risk_score(&self) -> Option<f64> {
        self.risk.risk_score()
    }

    pub fn status(&self) -> RiskStatus {
        self.risk.status()
    }
}
