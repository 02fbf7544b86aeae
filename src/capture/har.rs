// har.rs
use crate::capture::models::{Content, HarEntry};
use crate::capture::CaptureError;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Browsers are inconsistent about padding in captured bodies, so accept both.
const TOLERANT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// One recorded network exchange, with its response body already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureEntry {
    /// Position in `log.entries`.
    pub index: usize,
    pub url: String,
    pub method: String,
    pub mime_type: String,
    pub request_body: Option<String>,
    /// `None` when the body is missing or could not be decoded.
    pub body: Option<String>,
}

impl CaptureEntry {
    fn from_har(index: usize, har: HarEntry) -> Self {
        let body = decode_body(index, &har.response.content);

        Self {
            index,
            url: har.request.url.unwrap_or_default(),
            method: har.request.method.unwrap_or_default(),
            mime_type: har.response.content.mime_type.unwrap_or_default(),
            request_body: har.request.post_data.and_then(|p| p.text),
            body,
        }
    }

    /// Host part of the request URL, empty when the URL does not parse.
    pub fn host(&self) -> String {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default()
    }

    pub fn is_post(&self) -> bool {
        self.method.eq_ignore_ascii_case("POST")
    }

    /// GraphQL operation names declared in the request body. Batched
    /// requests carry an array of operations.
    pub fn operation_names(&self) -> Vec<String> {
        let Some(text) = self.request_body.as_deref() else {
            return Vec::new();
        };
        let Ok(request) = serde_json::from_str::<Value>(text) else {
            return Vec::new();
        };

        let operations = match &request {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };

        operations
            .into_iter()
            .filter_map(|op| op.get("operationName").and_then(Value::as_str))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// The ordered entries of a capture file.
#[derive(Debug, Default)]
pub struct Capture {
    pub entries: Vec<CaptureEntry>,
    /// Entries that were present but could not be read at all.
    pub skipped: usize,
}

impl Capture {
    /// Parses a HAR document. Never fails: a broken document is an empty
    /// capture, and a broken entry only loses that entry.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut doc: Value = match serde_json::from_slice(bytes) {
            Ok(v) => v,
            Err(e) => {
                warn!("Capture document is not valid JSON: {e}");
                return Self::default();
            }
        };

        let items = match doc.pointer_mut("/log/entries").map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("Capture document has no log.entries list");
                return Self::default();
            }
        };

        let mut capture = Self::default();

        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<HarEntry>(item) {
                Ok(har) => capture.entries.push(CaptureEntry::from_har(index, har)),
                Err(e) => {
                    debug!(index, "Skipping unreadable capture entry: {e}");
                    capture.skipped += 1;
                }
            }
        }

        capture
    }
}

/// Reads a capture file from disk. The only fatal outcomes are a missing
/// file and an I/O failure while reading it.
pub fn read_capture(path: &Path) -> Result<Capture, CaptureError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CaptureError::NotFound(path.to_path_buf()),
        _ => CaptureError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let capture = Capture::from_slice(&bytes);
    debug!(
        path = %path.display(),
        entries = capture.entries.len(),
        skipped = capture.skipped,
        "Capture loaded"
    );

    Ok(capture)
}

fn decode_body(index: usize, content: &Content) -> Option<String> {
    let text = content.text.as_deref()?;

    match content.encoding.as_deref() {
        Some(enc) if enc.eq_ignore_ascii_case("base64") => {
            let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();

            match TOLERANT_BASE64.decode(compact.as_bytes()) {
                Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                Err(e) => {
                    debug!(index, "Dropping undecodable base64 body: {e}");
                    None
                }
            }
        }
        _ => Some(text.to_string()),
    }
}
