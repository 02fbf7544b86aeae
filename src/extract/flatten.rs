// flatten.rs
use crate::domain::listing::FlattenedListing;
use serde_json::{Map, Value};

/// A nested key path inside a raw listing, e.g. `["address", "display"]`.
type FieldPath = &'static [&'static str];

// Each field lists the known upstream spellings, in order of preference.
const SUBURB: &[FieldPath] = &[&["address", "suburb"], &["location", "suburb"]];
const ADDRESS: &[FieldPath] = &[&["address", "display"], &["displayAddress"]];
const PROPERTY_TYPE: &[FieldPath] = &[&["propertyType"], &["listing", "propertyType"]];
const BEDROOMS: &[FieldPath] = &[&["bedrooms"], &["features", "beds"]];
const BATHROOMS: &[FieldPath] = &[&["bathrooms"], &["features", "baths"]];
const CAR_SPACES: &[FieldPath] = &[&["carspaces"], &["features", "cars"]];
const LAND_SIZE: &[FieldPath] = &[&["land", "size", "value"], &["landSize"], &["landSize", "value"]];
const SALE_DATE: &[FieldPath] = &[&["soldDetails", "soldDate"], &["soldOn"], &["soldDate"]];
const PRICE_DISPLAY: &[FieldPath] = &[
    &["price", "display"],
    &["soldDetails", "displayPrice"],
    &["priceText"],
];
const URL: &[FieldPath] = &[&["url"], &["href"]];
const ID: &[FieldPath] = &[&["id"], &["listingId"]];

/// Maps a raw listing of any shape onto the fixed schema. Never fails;
/// unresolved fields stay empty. `sold_price` is left for the listing set
/// to fill after dedup.
pub fn flatten_listing(record: &Map<String, Value>) -> FlattenedListing {
    FlattenedListing {
        suburb: resolve_text(record, SUBURB),
        address_display: resolve_text(record, ADDRESS),
        property_type: resolve_text(record, PROPERTY_TYPE),
        bedrooms: resolve_number(record, BEDROOMS),
        bathrooms: resolve_number(record, BATHROOMS),
        car_spaces: resolve_number(record, CAR_SPACES),
        land_size_sqm: resolve_number(record, LAND_SIZE),
        sale_date: resolve_text(record, SALE_DATE),
        sold_price_display: resolve_text(record, PRICE_DISPLAY),
        sold_price: None,
        id: resolve_text(record, ID),
        url: resolve_text(record, URL),
    }
}

fn lookup<'a>(record: &'a Map<String, Value>, path: FieldPath) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = record.get(*first)?;

    for key in rest {
        current = current.as_object()?.get(*key)?;
    }

    Some(current)
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn resolve_with<T>(
    record: &Map<String, Value>,
    paths: &[FieldPath],
    convert: fn(&Value) -> Option<T>,
) -> Option<T> {
    paths
        .iter()
        .filter_map(|path| lookup(record, *path))
        .filter(|value| !is_absent(value))
        .find_map(convert)
}

fn resolve_text(record: &Map<String, Value>, paths: &[FieldPath]) -> String {
    resolve_with(record, paths, as_text).unwrap_or_default()
}

fn resolve_number(record: &Map<String, Value>, paths: &[FieldPath]) -> Option<f64> {
    resolve_with(record, paths, as_number)
}
