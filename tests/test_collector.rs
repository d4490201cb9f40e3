//! Price collector tests for both strategies, using in-memory collaborators.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{fast_collector_config, items_at, FakePriceSource, FakeResolver};
use serde_json::json;
use supply_risk::config::CollectorConfig;
use supply_risk::pacing::Pacer;
use supply_risk::{CollectStrategy, PriceCollector};

fn calls(source_log: &common::CallLog) -> Vec<String> {
    source_log.lock().unwrap().clone()
}

fn counting_pacer(interval: Duration) -> (Pacer, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let pacer = Pacer::with_sleeper(interval, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (pacer, count)
}

// ---------------------------------------------------------------------------
// Direct strategy
// ---------------------------------------------------------------------------

#[test]
fn direct_normalizes_and_drops_bad_items() {
    let mut items = items_at(&[1.0, 2.0], "EUR", "France", "Paris");
    items.push(json!({"price": "n/a"}));
    items.push(json!({"currency": "EUR"}));
    let source = FakePriceSource::new().with_name("rice", items);
    let log = source.log();

    let collector = PriceCollector::direct(Box::new(source));
    assert_eq!(collector.strategy(), CollectStrategy::Direct);

    let records = collector.collect("rice", 50);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.product_code.is_none()));
    assert_eq!(calls(&log), vec!["name:rice:50"]);
}

#[test]
fn direct_truncates_to_target() {
    let source = FakePriceSource::new()
        .with_name("milk", items_at(&[1.0; 10], "EUR", "France", "Paris"));
    let records = PriceCollector::direct(Box::new(source)).collect("milk", 4);
    assert_eq!(records.len(), 4);
}

#[test]
fn direct_failure_yields_empty() {
    let source = FakePriceSource::new()
        .with_name("eggs", items_at(&[1.0], "EUR", "France", "Paris"))
        .failing("eggs");
    assert!(PriceCollector::direct(Box::new(source)).collect("eggs", 50).is_empty());
}

#[test]
fn zero_target_makes_no_calls() {
    let source = FakePriceSource::new();
    let log = source.log();
    assert!(PriceCollector::direct(Box::new(source)).collect("rice", 0).is_empty());
    assert!(calls(&log).is_empty());
}

// ---------------------------------------------------------------------------
// Two-step strategy
// ---------------------------------------------------------------------------

#[test]
fn two_step_splits_target_across_codes_and_tags_records() {
    let source = FakePriceSource::new()
        .with_code("111", items_at(&[1.0; 3], "EUR", "France", "Paris"))
        .with_code("222", items_at(&[2.0; 4], "EUR", "Spain", "Madrid"));
    let log = source.log();
    let resolver = FakeResolver::new().with_codes("rice", &["111", "222"]);

    let collector =
        PriceCollector::two_step(Box::new(source), Box::new(resolver), fast_collector_config());
    assert_eq!(collector.strategy(), CollectStrategy::TwoStep);

    let records = collector.collect("rice", 20);
    assert_eq!(calls(&log), vec!["code:111:10", "code:222:10"]);
    assert_eq!(records.len(), 7);
    assert_eq!(records[0].product_code.as_deref(), Some("111"));
    assert_eq!(records[6].product_code.as_deref(), Some("222"));
}

#[test]
fn per_code_request_has_a_floor() {
    let source = FakePriceSource::new();
    let log = source.log();
    let resolver = FakeResolver::new().with_codes("oil", &["1", "2", "3", "4", "5"]);
    let collector =
        PriceCollector::two_step(Box::new(source), Box::new(resolver), fast_collector_config());

    collector.collect("oil", 6);
    let log = calls(&log);
    assert_eq!(log.len(), 5);
    assert!(log.iter().all(|c| c.ends_with(":5")));
}

#[test]
fn at_most_max_codes_are_queried() {
    let source = FakePriceSource::new();
    let log = source.log();
    let resolver = FakeResolver::new().with_codes("wheat", &["1", "2", "3", "4", "5", "6", "7"]);
    let collector =
        PriceCollector::two_step(Box::new(source), Box::new(resolver), fast_collector_config());

    collector.collect("wheat", 50);
    assert_eq!(
        calls(&log),
        vec!["code:1:10", "code:2:10", "code:3:10", "code:4:10", "code:5:10"]
    );
}

#[test]
fn duplicate_codes_are_queried_once() {
    let source = FakePriceSource::new();
    let log = source.log();
    let resolver = FakeResolver::new().with_codes("milk", &["9", "9", "8"]);
    let collector =
        PriceCollector::two_step(Box::new(source), Box::new(resolver), fast_collector_config());

    collector.collect("milk", 10);
    assert_eq!(calls(&log), vec!["code:9:5", "code:8:5"]);
}

#[test]
fn stops_early_once_target_is_reached() {
    let source = FakePriceSource::new()
        .with_code("1", items_at(&[1.0; 12], "EUR", "France", "Paris"))
        .with_code("2", items_at(&[2.0; 12], "EUR", "France", "Paris"));
    let log = source.log();
    let resolver = FakeResolver::new().with_codes("eggs", &["1", "2", "3"]);
    let config = CollectorConfig {
        min_records_per_code: 12,
        ..fast_collector_config()
    };
    let collector = PriceCollector::two_step(Box::new(source), Box::new(resolver), config);

    let records = collector.collect("eggs", 10);
    assert_eq!(calls(&log), vec!["code:1:12"]);
    assert_eq!(records.len(), 10);
}

#[test]
fn no_codes_means_no_records_and_no_price_calls() {
    let source = FakePriceSource::new()
        .with_name("rice", items_at(&[1.0; 5], "EUR", "France", "Paris"));
    let log = source.log();
    let collector = PriceCollector::two_step(
        Box::new(source),
        Box::new(FakeResolver::new()),
        fast_collector_config(),
    );

    assert!(collector.collect("rice", 50).is_empty());
    assert!(calls(&log).is_empty());
}

#[test]
fn resolver_failure_yields_empty() {
    let source = FakePriceSource::new();
    let log = source.log();
    let collector = PriceCollector::two_step(
        Box::new(source),
        Box::new(FakeResolver::failing()),
        fast_collector_config(),
    );

    assert!(collector.collect("rice", 50).is_empty());
    assert!(calls(&log).is_empty());
}

#[test]
fn failing_code_is_skipped() {
    let source = FakePriceSource::new()
        .with_code("1", items_at(&[1.0; 3], "EUR", "France", "Paris"))
        .with_code("2", items_at(&[2.0; 3], "EUR", "France", "Paris"))
        .failing("1");
    let resolver = FakeResolver::new().with_codes("oil", &["1", "2"]);
    let collector =
        PriceCollector::two_step(Box::new(source), Box::new(resolver), fast_collector_config());

    let records = collector.collect("oil", 50);
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.product_code.as_deref() == Some("2")));
}

// ---------------------------------------------------------------------------
// Pacing
// ---------------------------------------------------------------------------

#[test]
fn pauses_between_codes_but_not_before_the_first() {
    let source = FakePriceSource::new();
    let resolver = FakeResolver::new().with_codes("rice", &["1", "2", "3"]);
    let (pacer, count) = counting_pacer(Duration::from_millis(500));
    let collector =
        PriceCollector::two_step(Box::new(source), Box::new(resolver), CollectorConfig::default())
            .with_pacer(pacer);

    collector.collect("rice", 50);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn single_code_never_pauses() {
    let source = FakePriceSource::new();
    let resolver = FakeResolver::new().with_codes("rice", &["1"]);
    let (pacer, count) = counting_pacer(Duration::from_millis(500));
    let collector =
        PriceCollector::two_step(Box::new(source), Box::new(resolver), CollectorConfig::default())
            .with_pacer(pacer);

    collector.collect("rice", 50);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}
