//! Coefficient-of-variation risk scoring.
//!
//! The score is the sample standard deviation (Bessel-corrected) divided by
//! the mean. Degenerate inputs never error: too few prices, a non-positive
//! mean, or a non-finite price all resolve to [`RiskStatus::NoData`].

use crate::models::{RiskAssessment, RiskStatus};

/// Scores strictly above this are `CRITICAL`.
pub const CRITICAL_THRESHOLD: f64 = 0.5;
/// Scores strictly above this (and not critical) are `WARNING`.
pub const WARNING_THRESHOLD: f64 = 0.3;
/// Decimal places kept on a returned score.
pub const SCORE_PRECISION: i32 = 4;

/// Score a set of prices.
pub fn score(prices: &[f64]) -> RiskAssessment {
    if prices.len() < 2 {
        return RiskAssessment::no_data();
    }
    let Some((scaled, _)) = normalized(prices) else {
        return RiskAssessment::no_data();
    };
    let Some(mean_val) = mean(&scaled) else {
        return RiskAssessment::no_data();
    };
    if mean_val <= 0.0 {
        return RiskAssessment::no_data();
    }
    let Some(std_val) = std_dev_around(&scaled, mean_val) else {
        return RiskAssessment::no_data();
    };

    RiskAssessment::from_cv(std_val / mean_val)
}

/// Map a coefficient of variation onto a numeric tier.
pub fn classify(cv: f64) -> RiskStatus {
    if cv > CRITICAL_THRESHOLD {
        RiskStatus::Critical
    } else if cv > WARNING_THRESHOLD {
        RiskStatus::Warning
    } else {
        RiskStatus::Stable
    }
}

/// Arithmetic mean, or `None` for an empty slice or a non-finite result.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let m = values.iter().sum::<f64>() / values.len() as f64;
    m.is_finite().then_some(m)
}

/// Sample standard deviation (divides by `n - 1`).
///
/// Returns `None` for fewer than two values or a non-finite result.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let (scaled, exp) = normalized(values)?;
    let sd = std_dev_around(&scaled, mean(&scaled)?)?;
    let sd = scale_pow2(sd, exp);
    sd.is_finite().then_some(sd)
}

fn std_dev_around(values: &[f64], m: f64) -> Option<f64> {
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    let sd = (sum_sq / (values.len() - 1) as f64).sqrt();
    sd.is_finite().then_some(sd)
}

/// `values` times the power of two that brings the largest magnitude near 1,
/// plus the exponent that undoes it.
///
/// Power-of-two scaling keeps every rounding step identical to the unscaled
/// computation while keeping squares clear of underflow and sums clear of
/// overflow. `None` if any value is not finite.
fn normalized(values: &[f64]) -> Option<(Vec<f64>, i32)> {
    if !values.iter().all(|v| v.is_finite()) {
        return None;
    }
    let max_abs = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if max_abs == 0.0 {
        return Some((values.to_vec(), 0));
    }
    let exp = max_abs.log2().floor() as i32;
    Some((values.iter().map(|v| scale_pow2(*v, -exp)).collect(), exp))
}

/// `value * 2^exp`, split in two factors so each stays a normal `f64`.
fn scale_pow2(value: f64, exp: i32) -> f64 {
    let half = exp / 2;
    value * pow2(half) * pow2(exp - half)
}

fn pow2(exp: i32) -> f64 {
    f64::from_bits(((exp + 1023) as u64) << 52)
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
