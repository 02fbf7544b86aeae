// pipeline.rs
use crate::capture::{read_capture, Capture, CaptureEntry};
use crate::config::{EntryFilters, ExtractConfig};
use crate::domain::listing::FlattenedListing;
use crate::domain::listing_set::ListingSet;
use crate::errors::AppError;
use crate::extract::{find_candidate_arrays, flatten_listing, BodyKind, EmbeddedExtractor};
use crate::spreadsheets::save_listings;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Counters collected over one extraction run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    pub entries_read: usize,
    pub entries_unreadable: usize,
    pub entries_filtered: usize,
    pub entries_without_body: usize,
    pub json_bodies: usize,
    pub html_bodies: usize,
    pub script_bodies: usize,
    pub arrays_checked: usize,
    pub arrays_matched: usize,
    pub records_flattened: usize,
    pub duplicates_dropped: usize,
    pub rows_written: usize,
}

#[derive(Debug)]
pub enum ExtractOutcome {
    Written {
        path: PathBuf,
        report: ExtractReport,
    },
    /// Nothing listing-like was found. Not an error: the capture step can
    /// simply be repeated.
    Empty { report: ExtractReport },
}

impl ExtractOutcome {
    pub fn report(&self) -> &ExtractReport {
        match self {
            ExtractOutcome::Written { report, .. } | ExtractOutcome::Empty { report } => report,
        }
    }
}

pub struct Extractor {
    config: ExtractConfig,
    embedded: EmbeddedExtractor,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Result<Self, AppError> {
        let embedded = EmbeddedExtractor::new(&config.embedded)?;
        Ok(Self { config, embedded })
    }

    /// Capture file in, listing table out.
    pub fn run(&self) -> Result<ExtractOutcome, AppError> {
        let capture = read_capture(&self.config.capture_path)?;

        let mut report = ExtractReport::default();
        let rows = self.collect(&capture, &mut report);

        let listings = ListingSet::build(rows);
        report.duplicates_dropped = listings.duplicates_dropped();

        if listings.is_empty() {
            warn!(
                capture = %self.config.capture_path.display(),
                "No listing-like data found. Re-capture with longer waits or more scrolling, \
                 or widen the listing heuristic in the config."
            );
            return Ok(ExtractOutcome::Empty { report });
        }

        let path = self.config.output_path.clone();
        save_listings(listings.rows(), &path, self.config.output_format())?;
        report.rows_written = listings.len();

        info!(
            arrays_checked = report.arrays_checked,
            arrays_matched = report.arrays_matched,
            html_scanned = report.html_bodies,
            js_scanned = report.script_bodies,
            "Extraction finished"
        );
        info!(
            "Wrote {} unique rows to {}",
            report.rows_written,
            path.display()
        );

        Ok(ExtractOutcome::Written { path, report })
    }

    /// Flattens every listing-like record in capture order, before dedup.
    pub fn collect(&self, capture: &Capture, report: &mut ExtractReport) -> Vec<FlattenedListing> {
        let mut rows = Vec::new();
        report.entries_read += capture.entries.len();
        report.entries_unreadable += capture.skipped;

        for entry in &capture.entries {
            if !accepts(&self.config.filters, entry) {
                report.entries_filtered += 1;
                continue;
            }

            for payload in self.payloads(entry, report) {
                let scan = find_candidate_arrays(&payload, &self.config.heuristic);
                report.arrays_checked += scan.arrays_checked;

                for candidate in scan.candidates {
                    debug!(
                        entry = entry.index,
                        path = %candidate.path,
                        records = candidate.records.len(),
                        "Listing-like array matched"
                    );
                    report.arrays_matched += 1;
                    report.records_flattened += candidate.records.len();
                    rows.extend(candidate.records.into_iter().map(flatten_listing));
                }
            }
        }

        rows
    }

    /// Decoded payloads carried by one entry. Unparseable bodies give none.
    fn payloads(&self, entry: &CaptureEntry, report: &mut ExtractReport) -> Vec<Value> {
        let Some(body) = entry.body.as_deref().filter(|b| !b.trim().is_empty()) else {
            report.entries_without_body += 1;
            return Vec::new();
        };

        match BodyKind::classify(&entry.mime_type, body) {
            BodyKind::Json => {
                report.json_bodies += 1;
                match serde_json::from_str::<Value>(body) {
                    Ok(payload) => vec![payload],
                    Err(e) => {
                        debug!(entry = entry.index, "Skipping unparseable JSON body: {e}");
                        Vec::new()
                    }
                }
            }
            BodyKind::Html if self.config.scan_markup => {
                report.html_bodies += 1;
                self.embedded.extract(body)
            }
            BodyKind::Script if self.config.scan_markup => {
                report.script_bodies += 1;
                self.embedded.extract(body)
            }
            BodyKind::Html | BodyKind::Script | BodyKind::Other => Vec::new(),
        }
    }
}

fn accepts(filters: &EntryFilters, entry: &CaptureEntry) -> bool {
    if let Some(needle) = filters.url_contains.as_deref() {
        if !entry.url.contains(needle) {
            return false;
        }
    }

    if let Some(op) = filters.operation_name.as_deref() {
        if !entry.operation_names().iter().any(|name| name == op) {
            return false;
        }
    }

    true
}
