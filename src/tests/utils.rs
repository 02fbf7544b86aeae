use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Builds synthetic HAR documents for end-to-end runs.
#[derive(Default)]
pub struct HarBuilder {
    entries: Vec<Value>,
}

impl HarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json_response(self, url: &str, body: &Value) -> Self {
        self.entry(url, "GET", None, "application/json", &body.to_string(), false)
    }

    pub fn graphql_response(self, url: &str, operation: &str, body: &Value) -> Self {
        let request = json!({ "operationName": operation, "variables": {} }).to_string();
        self.entry(url, "POST", Some(&request), "application/json", &body.to_string(), false)
    }

    pub fn html_response(self, url: &str, html: &str) -> Self {
        self.entry(url, "GET", None, "text/html; charset=utf-8", html, false)
    }

    pub fn script_response(self, url: &str, script: &str) -> Self {
        self.entry(url, "GET", None, "application/javascript", script, false)
    }

    pub fn base64_response(self, url: &str, mime: &str, body: &str) -> Self {
        self.entry(url, "GET", None, mime, body, true)
    }

    pub fn raw_entry(mut self, entry: Value) -> Self {
        self.entries.push(entry);
        self
    }

    fn entry(
        mut self,
        url: &str,
        method: &str,
        request_body: Option<&str>,
        mime: &str,
        body: &str,
        base64: bool,
    ) -> Self {
        let mut request = json!({ "url": url, "method": method });
        if let Some(text) = request_body {
            request["postData"] = json!({ "mimeType": "application/json", "text": text });
        }

        let content = if base64 {
            json!({ "mimeType": mime, "text": STANDARD.encode(body), "encoding": "base64" })
        } else {
            json!({ "mimeType": mime, "text": body })
        };

        self.entries.push(json!({
            "request": request,
            "response": { "status": 200, "content": content }
        }));
        self
    }

    pub fn write_to(&self, path: &Path) {
        let doc = json!({ "log": { "version": "1.2", "entries": self.entries } });
        std::fs::write(path, serde_json::to_vec_pretty(&doc).unwrap())
            .unwrap_or_else(|e| panic!("failed to write capture {}: {e}", path.display()));
    }
}

/// Capture and output paths inside a scratch directory.
pub fn scratch_paths(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
    (
        dir.path().join("network.har"),
        dir.path().join("melbourne_housing.csv"),
    )
}
