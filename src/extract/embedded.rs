// embedded.rs
use crate::extract::PatternError;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Where to look for JSON inside HTML pages and scripts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmbeddedPatterns {
    /// Global variables that get assigned the page's initial state,
    /// e.g. `window.__INITIAL_STATE__ = {...};`
    pub state_globals: Vec<String>,
    /// Smallest brace-delimited chunk worth trying in the last-resort scan.
    pub min_blob_len: usize,
}

impl Default for EmbeddedPatterns {
    fn default() -> Self {
        Self {
            state_globals: vec!["__INITIAL_STATE__".to_string()],
            min_blob_len: 500,
        }
    }
}

/// Pulls JSON blobs out of HTML or JavaScript text.
pub struct EmbeddedExtractor {
    state_assignments: Vec<Regex>,
    structured_data: Selector,
    next_data: Selector,
    generic_blob: Regex,
}

impl EmbeddedExtractor {
    pub fn new(patterns: &EmbeddedPatterns) -> Result<Self, PatternError> {
        let state_assignments = patterns
            .state_globals
            .iter()
            .map(|name| Regex::new(&format!(r"(?:\bwindow\.)?\b{}\s*=\s*", regex::escape(name))))
            .collect::<Result<Vec<_>, _>>()?;

        let structured_data = Selector::parse(r#"script[type="application/ld+json"]"#)
            .map_err(|e| PatternError::Selector(e.to_string()))?;
        let next_data = Selector::parse(r#"script[id="__NEXT_DATA__"]"#)
            .map_err(|e| PatternError::Selector(e.to_string()))?;

        let generic_blob = Regex::new(&format!(
            r"\{{[^<>{{}}]{{{},}}\}}",
            patterns.min_blob_len.max(1)
        ))?;

        Ok(Self {
            state_assignments,
            structured_data,
            next_data,
            generic_blob,
        })
    }

    /// Every JSON blob found in `text`, in the order they were found.
    /// Blobs that fail to parse are silently dropped.
    pub fn extract(&self, text: &str) -> Vec<Value> {
        let mut blobs = self.state_blobs(text);
        blobs.extend(self.script_blobs(text));

        if blobs.is_empty() {
            blobs = self.generic_blobs(text);
        }

        debug!(count = blobs.len(), "Embedded JSON blobs extracted");
        blobs
    }

    fn state_blobs(&self, text: &str) -> Vec<Value> {
        self.state_assignments
            .iter()
            .flat_map(|re| re.find_iter(text))
            .filter_map(|m| first_json_value(&text[m.end()..]))
            .filter(Value::is_object)
            .collect()
    }

    fn script_blobs(&self, text: &str) -> Vec<Value> {
        let document = Html::parse_document(text);

        document
            .select(&self.structured_data)
            .chain(document.select(&self.next_data))
            .filter_map(|element| {
                let body: String = element.text().collect();
                serde_json::from_str::<Value>(body.trim()).ok()
            })
            .filter(|v| v.is_object() || v.is_array())
            .collect()
    }

    fn generic_blobs(&self, text: &str) -> Vec<Value> {
        self.generic_blob
            .find_iter(text)
            .filter_map(|m| serde_json::from_str::<Value>(m.as_str()).ok())
            .collect()
    }
}

/// Parses one JSON value from the start of `text`, ignoring whatever
/// follows it (`;`, more script, closing tags).
fn first_json_value(text: &str) -> Option<Value> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .next()
        .and_then(Result::ok)
}
