//! Live smoke test against the public Open Prices API.
//!
//! Exercises the collectors, analysis, comparison, snapshot store and tool
//! surface end to end. Alerts are checked for configuration only.
//!
//! Run with:
//! ```sh
//! cargo test -- --ignored --nocapture
//! ```

use std::time::Duration;

use serde_json::json;
use supply_risk::{AlertConfig, CollectStrategy, RiskStatus, SupplyRisk};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Print a section header to stderr.
fn section(name: &str) {
    eprintln!("\n{}", "=".repeat(60));
    eprintln!("  {}", name);
    eprintln!("{}", "=".repeat(60));
}

/// Counters for pass/fail reporting.
struct Counters {
    pass: usize,
    fail: usize,
}

impl Counters {
    fn new() -> Self {
        Self { pass: 0, fail: 0 }
    }

    fn check(&mut self, label: &str, condition: bool, detail: &str) {
        let status = if condition { "PASS" } else { "FAIL" };
        if condition {
            self.pass += 1;
        } else {
            self.fail += 1;
        }
        if detail.is_empty() {
            eprintln!("  [{}] {}", status, label);
        } else {
            eprintln!("  [{}] {} -- {}", status, label, detail);
        }
    }
}

// ---------------------------------------------------------------------------
// Main smoke test
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn smoke_test() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let risk = SupplyRisk::builder()
        .data_dir(tmp_dir.path())
        .commodities(&["rice", "milk"])
        .alerts(AlertConfig::default())
        .timeout(Duration::from_secs(60))
        .build()
        .unwrap();
    let direct = SupplyRisk::builder()
        .data_dir(tmp_dir.path())
        .strategy(CollectStrategy::Direct)
        .alerts(AlertConfig::default())
        .build()
        .unwrap();
    let mut c = Counters::new();

    // ================================================================
    // 1. SINGLE COMMODITY
    // ================================================================
    section("analyze_commodity");

    let rice = risk.analyze_commodity("rice");
    c.check(
        "two-step rice report",
        rice.sample_size <= 50,
        &format!(
            "n={}, status={}, score={:?}, currency={}",
            rice.sample_size,
            rice.status(),
            rice.risk_score(),
            rice.currency
        ),
    );
    c.check(
        "no data means no score",
        rice.sample_size >= 2 || rice.status() == RiskStatus::NoData,
        "",
    );
    c.check(
        "regions within limit",
        rice.regions.by_country.len() <= 5 && rice.regions.by_city.len() <= 5,
        &format!(
            "countries={}, cities={}",
            rice.regions.by_country.len(),
            rice.regions.by_city.len()
        ),
    );

    let milk = direct.analyze_commodity("milk");
    c.check(
        "direct milk report",
        milk.sample_size <= 50,
        &format!("n={}, status={}", milk.sample_size, milk.status()),
    );

    // ================================================================
    // 2. BATCH + SNAPSHOT
    // ================================================================
    section("scan / latest_report");

    let missing = risk.tools().get_supply_chain_report().unwrap();
    c.check("report missing before scan", missing.get("error").is_some(), "");

    let snapshot = risk.scan().unwrap();
    c.check(
        "scan covers tracked list",
        snapshot.commodities.len() == 2,
        &format!("timestamp={}", snapshot.timestamp),
    );
    let loaded = risk.latest_report().unwrap();
    c.check(
        "latest_report matches scan",
        loaded.commodities.len() == snapshot.commodities.len(),
        "",
    );

    // ================================================================
    // 3. TOOLS
    // ================================================================
    section("tools");

    let listed = risk.tools().call("list_commodities", json!(null)).unwrap();
    c.check("list_commodities", listed == json!(["rice", "milk"]), "");

    let compared = risk
        .tools()
        .call("compare_commodities", json!({"commodities": ["eggs", "oil"]}))
        .unwrap();
    c.check(
        "compare_commodities",
        compared["commodities"].as_array().map(|a| a.len()) == Some(2),
        &format!("summary={}", compared["summary"]),
    );

    let alert = risk
        .tools()
        .call(
            "send_supply_chain_alert",
            json!({"recipient_email": "ops@example.com"}),
        )
        .unwrap();
    c.check(
        "alert without credentials",
        alert.get("error").is_some(),
        "",
    );

    let display = format!("{}", risk);
    c.check(
        "Display impl",
        display.contains("SupplyRisk"),
        &format!("display={}", display),
    );

    // ================================================================
    // SUMMARY
    // ================================================================
    section("SMOKE TEST COMPLETE");

    eprintln!("  Total:   {} checks", c.pass + c.fail);
    eprintln!("  Passed:  {}", c.pass);
    eprintln!("  Failed:  {}", c.fail);
    eprintln!();

    if c.fail > 0 {
        eprintln!("  *** FAILURES DETECTED ***");
        eprintln!();
    }

    assert_eq!(c.fail, 0, "{} smoke test checks failed", c.fail);
}
