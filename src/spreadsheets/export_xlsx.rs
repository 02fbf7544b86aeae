use crate::domain::listing::{Cell, FlattenedListing, LISTING_COLUMNS};
use crate::spreadsheets::ExportError;
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub fn save_listings_xlsx(listings: &[FlattenedListing], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Headers
    for (col, header) in LISTING_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    // Rows
    for (i, listing) in listings.iter().enumerate() {
        let r = (i + 1) as u32;

        for (col, cell) in listing.cells().iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(r, col, *s)?;
                }
                Cell::Count(_) | Cell::Price(_) => {
                    // Missing numbers stay as blank cells.
                    if let Some(n) = cell.number() {
                        worksheet.write_number(r, col, n)?;
                    }
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
