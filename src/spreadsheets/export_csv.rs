use crate::domain::listing::{Cell, FlattenedListing, LISTING_COLUMNS};
use crate::spreadsheets::ExportError;
use csv::{Terminator, WriterBuilder};
use std::io::Write;

/// Writes the header and one row per listing. Output is a pure function of
/// the input, so re-running on the same capture gives identical bytes.
pub fn write_listings_csv<W: Write>(
    listings: &[FlattenedListing],
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(LISTING_COLUMNS)?;

    for listing in listings {
        wtr.write_record(listing.cells().iter().map(Cell::render))?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
