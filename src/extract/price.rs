// price.rs
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,.]*").expect("price pattern is valid"));

/// Pulls the first number out of a display price such as `"$650,000"`.
/// Returns `None` for text with no digits ("Contact Agent", "Under offer").
pub fn parse_price_text(text: &str) -> Option<f64> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let run = PRICE_RE.find(&compact)?.as_str();

    let digits: String = run
        .trim_end_matches(['.', ','])
        .chars()
        .filter(|c| *c != ',')
        .collect();

    digits.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Same as [`parse_price_text`], but anything other than a JSON string is null.
pub fn parse_price(value: &Value) -> Option<f64> {
    value.as_str().and_then(parse_price_text)
}
