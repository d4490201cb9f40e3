//! Conversion of raw Open Prices items into [`PriceRecord`]s.
//!
//! Upstream items are loosely shaped: prices arrive as numbers or strings,
//! location data may be missing or nested under differently named keys. Only
//! the price is mandatory; everything else degrades to a default.

use serde_json::{Map, Value};

use crate::models::PriceRecord;

const UNKNOWN: &str = "Unknown";

/// Normalize one upstream item, or `None` if it carries no usable price.
pub fn normalize_item(item: &Value) -> Option<PriceRecord> {
    let obj = item.as_object()?;
    let price = parse_price(obj.get("price")?)?;

    let location = obj.get("location").and_then(Value::as_object);
    let country = location
        .and_then(|loc| first_text(loc, &["osm_address_country", "country"]))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let city = location
        .and_then(|loc| first_text(loc, &["osm_address_city", "city"]))
        .unwrap_or_else(|| UNKNOWN.to_string());

    Some(PriceRecord {
        price,
        currency: text(obj, "currency").unwrap_or_default(),
        country,
        city,
        date: text(obj, "date").unwrap_or_default(),
        product_code: None,
    })
}

/// Normalize a batch of items, silently dropping the ones without a price.
pub fn normalize_items(items: &[Value]) -> Vec<PriceRecord> {
    items.iter().filter_map(normalize_item).collect()
}

/// Parse a JSON price that may be a number or a numeric string.
pub fn parse_price(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trimmed, non-empty string value of `key`.
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| text(obj, k))
}
