pub mod export_csv;
pub mod export_error;
pub mod export_xlsx;

pub use export_csv::write_listings_csv;
pub use export_error::ExportError;
pub use export_xlsx::save_listings_xlsx;

use crate::domain::listing::FlattenedListing;
use clap::ValueEnum;
use serde::Deserialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

impl OutputFormat {
    /// `.xlsx` files get a workbook, everything else CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => OutputFormat::Xlsx,
            _ => OutputFormat::Csv,
        }
    }
}

pub fn save_listings(
    listings: &[FlattenedListing],
    path: &Path,
    format: OutputFormat,
) -> Result<(), ExportError> {
    match format {
        OutputFormat::Csv => {
            let file = File::create(path).map_err(|source| ExportError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            write_listings_csv(listings, BufWriter::new(file))
        }
        OutputFormat::Xlsx => save_listings_xlsx(listings, path),
    }
}
