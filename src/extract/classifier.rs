// classifier.rs
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Decides whether a JSON object looks like one property listing.
///
/// Two tiers: the object must share at least one key with `listing_keys`,
/// and carry at least `min_priority_matches` of the `priority_keys`. A lone
/// generic key such as `id` is not enough.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListingHeuristic {
    pub listing_keys: BTreeSet<String>,
    pub priority_keys: Vec<String>,
    pub min_priority_matches: usize,
}

impl Default for ListingHeuristic {
    fn default() -> Self {
        let listing_keys = [
            "address",
            "displayAddress",
            "suburb",
            "location",
            "price",
            "sold",
            "soldDetails",
            "bedrooms",
            "bathrooms",
            "carspaces",
            "features",
            "url",
            "href",
            "listingId",
            "id",
            "propertyType",
            "landSize",
            "land",
        ];
        let priority_keys = [
            "address",
            "displayAddress",
            "price",
            "bedrooms",
            "bathrooms",
            "suburb",
            "location",
            "soldDetails",
        ];

        Self {
            listing_keys: listing_keys.iter().map(|k| k.to_string()).collect(),
            priority_keys: priority_keys.iter().map(|k| k.to_string()).collect(),
            min_priority_matches: 2,
        }
    }
}

impl ListingHeuristic {
    pub fn matches(&self, record: &Map<String, Value>) -> bool {
        if !record.keys().any(|k| self.listing_keys.contains(k)) {
            return false;
        }

        let priority_hits = self
            .priority_keys
            .iter()
            .filter(|k| record.contains_key(k.as_str()))
            .count();

        priority_hits >= self.min_priority_matches
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a payload, e.g. `data.results.items` or `[0].listings`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath(Vec<PathSegment>);

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(k) if i == 0 => write!(f, "{k}")?,
                PathSegment::Key(k) => write!(f, ".{k}")?,
                PathSegment::Index(n) => write!(f, "[{n}]")?,
            }
        }
        Ok(())
    }
}

/// An array whose first object element passed the heuristic. Every object
/// element is kept; non-object elements are dropped.
#[derive(Debug)]
pub struct CandidateArray<'a> {
    pub path: JsonPath,
    pub records: Vec<&'a Map<String, Value>>,
}

#[derive(Debug, Default)]
pub struct ArrayScan<'a> {
    pub arrays_checked: usize,
    pub candidates: Vec<CandidateArray<'a>>,
}

/// Walks the payload depth-first, in document order, and returns every
/// listing-like array at any depth.
pub fn find_candidate_arrays<'a>(payload: &'a Value, heuristic: &ListingHeuristic) -> ArrayScan<'a> {
    let mut scan = ArrayScan::default();
    let mut path = Vec::new();
    walk(payload, &mut path, heuristic, &mut scan);
    scan
}

fn walk<'a>(
    value: &'a Value,
    path: &mut Vec<PathSegment>,
    heuristic: &ListingHeuristic,
    scan: &mut ArrayScan<'a>,
) {
    match value {
        Value::Array(items) => {
            scan.arrays_checked += 1;

            // Only the first object is sampled; the rest are assumed to share its shape.
            let sample = items.iter().find_map(Value::as_object);
            if sample.is_some_and(|record| heuristic.matches(record)) {
                scan.candidates.push(CandidateArray {
                    path: JsonPath(path.clone()),
                    records: items.iter().filter_map(Value::as_object).collect(),
                });
            }

            for (i, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(i));
                walk(item, path, heuristic, scan);
                path.pop();
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                path.push(PathSegment::Key(key.clone()));
                walk(child, path, heuristic, scan);
                path.pop();
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}
