// probe.rs
use crate::capture::Capture;
use std::collections::BTreeMap;
use std::fmt;

const TOP_N: usize = 8;

/// Traffic overview of a capture, used to decide which entries carry
/// listing data before tuning the extractor.
#[derive(Debug, Default, PartialEq)]
pub struct ProbeSummary {
    pub total_entries: usize,
    pub hosts: BTreeMap<String, usize>,
    pub post_hosts: BTreeMap<String, usize>,
    pub graphql_posts: usize,
    pub operation_names: BTreeMap<String, usize>,
    pub content_types: BTreeMap<String, usize>,
}

pub fn probe_capture(capture: &Capture) -> ProbeSummary {
    let mut summary = ProbeSummary {
        total_entries: capture.entries.len(),
        ..Default::default()
    };

    for entry in &capture.entries {
        let host = entry.host();
        *summary.hosts.entry(host.clone()).or_default() += 1;
        *summary
            .content_types
            .entry(entry.mime_type.clone())
            .or_default() += 1;

        if !entry.is_post() {
            continue;
        }

        *summary.post_hosts.entry(host).or_default() += 1;

        if entry.url.contains("/graphql") {
            summary.graphql_posts += 1;
        }

        for name in entry.operation_names() {
            *summary.operation_names.entry(name).or_default() += 1;
        }
    }

    summary
}

/// Most frequent keys first, ties broken by name.
fn most_common(counts: &BTreeMap<String, usize>, n: usize) -> Vec<(&str, usize)> {
    let mut ranked: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
}

impl fmt::Display for ProbeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== CAPTURE SUMMARY ===")?;
        writeln!(f, "Total entries: {}", self.total_entries)?;
        writeln!(f, "Unique hosts: {}", self.hosts.len())?;

        writeln!(f, "Top hosts:")?;
        for (host, n) in most_common(&self.hosts, TOP_N) {
            writeln!(f, "  {:40} {n}", or_none(host))?;
        }

        writeln!(f, "\nPOST requests by host:")?;
        for (host, n) in most_common(&self.post_hosts, TOP_N) {
            writeln!(f, "  {:40} {n}", or_none(host))?;
        }

        writeln!(f, "\nGraphQL POSTs seen: {}", self.graphql_posts)?;

        writeln!(f, "\nOperation names observed (from request bodies):")?;
        if self.operation_names.is_empty() {
            writeln!(f, "  (none found)")?;
        }
        for (op, n) in most_common(&self.operation_names, usize::MAX) {
            writeln!(f, "  {op:30} {n}")?;
        }

        writeln!(f, "\nResponse content types observed:")?;
        for (ct, n) in most_common(&self.content_types, TOP_N) {
            writeln!(f, "  {}: {n}", or_none(ct))?;
        }

        Ok(())
    }
}

fn or_none(s: &str) -> &str {
    if s.is_empty() {
        "(none)"
    } else {
        s
    }
}
