// src/domain/listing_set.rs

use crate::domain::listing::FlattenedListing;
use crate::extract::parse_price_text;
use std::collections::HashSet;

/// Identity of a row: its id when it has one, else where it is.
#[derive(Debug, PartialEq, Eq, Hash)]
enum DedupKey<'a> {
    Id(&'a str),
    AddressSuburb(&'a str, &'a str),
}

impl<'a> DedupKey<'a> {
    fn for_row(row: &'a FlattenedListing) -> Self {
        match row.id.trim() {
            "" => DedupKey::AddressSuburb(row.address_display.trim(), row.suburb.trim()),
            id => DedupKey::Id(id),
        }
    }
}

/// Deduplicated listings, in first-seen order, with `sold_price` filled in.
#[derive(Debug, Default)]
pub struct ListingSet {
    rows: Vec<FlattenedListing>,
    duplicates_dropped: usize,
}

impl ListingSet {
    /// Dedups `rows` (first occurrence wins) and then derives `sold_price`
    /// from each surviving row's display price.
    pub fn build(rows: Vec<FlattenedListing>) -> Self {
        let mut set = Self::dedup(rows);
        set.normalize_prices();
        set
    }

    fn dedup(rows: Vec<FlattenedListing>) -> Self {
        let total = rows.len();

        let mut seen = HashSet::new();
        let keep: Vec<bool> = rows.iter().map(|row| seen.insert(DedupKey::for_row(row))).collect();
        drop(seen);

        let rows: Vec<FlattenedListing> = rows
            .into_iter()
            .zip(keep)
            .filter_map(|(row, keep)| keep.then_some(row))
            .collect();

        Self {
            duplicates_dropped: total - rows.len(),
            rows,
        }
    }

    fn normalize_prices(&mut self) {
        for row in &mut self.rows {
            row.sold_price = parse_price_text(&row.sold_price_display);
        }
    }

    pub fn rows(&self) -> &[FlattenedListing] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }
}
