//! Tool-call dispatch tests.

mod common;

use common::{items_at, setup_direct_sdk, FakePriceSource};
use serde_json::json;
use supply_risk::tools::ToolKit;
use supply_risk::SupplyRiskError;

fn critical_source() -> FakePriceSource {
    FakePriceSource::new()
        .with_name("rice", items_at(&[1.0, 10.0], "EUR", "France", "Paris"))
        .with_name("milk", items_at(&[1.0, 1.0], "EUR", "France", "Paris"))
}

#[test]
fn definitions_cover_every_tool() {
    let names: Vec<&str> = ToolKit::definitions().iter().map(|d| d.name).collect();
    assert_eq!(
        names,
        vec![
            "investigate_commodity",
            "get_supply_chain_report",
            "list_commodities",
            "compare_commodities",
            "send_supply_chain_alert"
        ]
    );
    for def in ToolKit::definitions() {
        assert_eq!(def.input_schema["type"], "object");
    }
}

#[test]
fn list_commodities_returns_configured_list() {
    let (risk, _tmp) = setup_direct_sdk(FakePriceSource::new(), &["rice", "milk"]);
    let value = risk.tools().call("list_commodities", json!(null)).unwrap();
    assert_eq!(value, json!(["rice", "milk"]));
}

#[test]
fn investigate_commodity_returns_report() {
    let (risk, _tmp) = setup_direct_sdk(critical_source(), &["rice"]);
    let value = risk
        .tools()
        .call("investigate_commodity", json!({"commodity": "rice"}))
        .unwrap();
    assert_eq!(value["name"], "rice");
    assert_eq!(value["status"], "CRITICAL");
    assert_eq!(value["sample_size"], 2);
}

#[test]
fn missing_arguments_are_invalid() {
    let (risk, _tmp) = setup_direct_sdk(FakePriceSource::new(), &["rice"]);
    let err = risk.tools().call("investigate_commodity", json!({})).unwrap_err();
    assert!(matches!(err, SupplyRiskError::InvalidArgument(_)));
}

#[test]
fn unknown_tool_is_invalid() {
    let (risk, _tmp) = setup_direct_sdk(FakePriceSource::new(), &["rice"]);
    let err = risk.tools().call("forecast_prices", json!({})).unwrap_err();
    assert!(matches!(
        err,
        SupplyRiskError::InvalidArgument(msg) if msg.contains("forecast_prices")
    ));
}

#[test]
fn report_tool_explains_missing_report() {
    let (risk, _tmp) = setup_direct_sdk(FakePriceSource::new(), &["rice"]);
    let value = risk.tools().call("get_supply_chain_report", json!({})).unwrap();
    assert!(value["error"].as_str().unwrap().starts_with("Report not yet generated"));
}

#[test]
fn report_tool_returns_saved_snapshot() {
    let (risk, _tmp) = setup_direct_sdk(critical_source(), &["rice", "milk"]);
    risk.scan().unwrap();
    let value = risk.tools().call("get_supply_chain_report", json!({})).unwrap();
    assert_eq!(value["commodities"][0]["name"], "rice");
    assert_eq!(value["commodities"][1]["status"], "STABLE");
    assert!(value["timestamp"].is_string());
}

#[test]
fn compare_tool_summarizes() {
    let (risk, _tmp) = setup_direct_sdk(critical_source(), &[]);
    let value = risk
        .tools()
        .call("compare_commodities", json!({"commodities": ["milk", "rice", "tea"]}))
        .unwrap();
    assert_eq!(value["commodities"].as_array().unwrap().len(), 3);
    assert_eq!(value["summary"]["critical_count"], 1);
    assert_eq!(value["summary"]["stable_count"], 1);
    assert_eq!(value["summary"]["highest_risk"]["name"], "rice");
}

#[test]
fn alert_tool_requires_configuration() {
    let (risk, _tmp) = setup_direct_sdk(critical_source(), &["rice"]);
    let value = risk
        .tools()
        .call("send_supply_chain_alert", json!({"recipient_email": "ops@example.com"}))
        .unwrap();
    assert!(value["error"].as_str().unwrap().contains("not configured"));
}
