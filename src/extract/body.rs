// body.rs
use mime::Mime;

/// How a response body should be searched for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Parsed directly as a payload.
    Json,
    /// Searched for embedded JSON.
    Html,
    Script,
    /// Not a listing source.
    Other,
}

impl BodyKind {
    /// Classifies by declared MIME type. Only an undeclared type falls back
    /// to sniffing the body.
    pub fn classify(mime_type: &str, body: &str) -> Self {
        let declared = mime_type.trim();

        if declared.is_empty() {
            let lead = body.trim_start();
            return if lead.starts_with('{') || lead.starts_with('[') {
                BodyKind::Json
            } else {
                BodyKind::Other
            };
        }

        match declared.parse::<Mime>() {
            Ok(m) => Self::from_mime(&m),
            Err(_) => Self::from_substring(&declared.to_ascii_lowercase()),
        }
    }

    fn from_mime(m: &Mime) -> Self {
        let subtype = m.subtype();

        if subtype == mime::JSON || m.suffix() == Some(mime::JSON) {
            BodyKind::Json
        } else if subtype == mime::HTML || subtype.as_str() == "xhtml" {
            BodyKind::Html
        } else if matches!(
            subtype.as_str(),
            "javascript" | "x-javascript" | "ecmascript"
        ) {
            BodyKind::Script
        } else {
            BodyKind::Other
        }
    }

    fn from_substring(declared: &str) -> Self {
        if declared.contains("json") {
            BodyKind::Json
        } else if declared.contains("html") {
            BodyKind::Html
        } else if declared.contains("javascript") {
            BodyKind::Script
        } else {
            BodyKind::Other
        }
    }
}
