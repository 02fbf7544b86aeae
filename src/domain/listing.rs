// src/domain/listing.rs

/// Output column order of the listing table.
pub const LISTING_COLUMNS: [&str; 12] = [
    "suburb",
    "address_display",
    "property_type",
    "bedrooms",
    "bathrooms",
    "car_spaces",
    "land_size_sqm",
    "sale_date",
    "sold_price_display",
    "id",
    "url",
    "sold_price",
];

/// One listing mapped onto the fixed output schema. Text fields are empty
/// and numeric fields are `None` when the source had nothing for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedListing {
    // Location
    pub suburb: String,
    pub address_display: String,

    // Description
    pub property_type: String,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub car_spaces: Option<f64>,
    pub land_size_sqm: Option<f64>,

    // Sale
    pub sale_date: String,
    pub sold_price_display: String,
    /// Derived from `sold_price_display` after dedup.
    pub sold_price: Option<f64>,

    // Source identity
    pub id: String,
    pub url: String,
}

/// A cell value, kept typed so spreadsheet writers can emit real numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Count(Option<f64>),
    Price(Option<f64>),
}

impl Cell<'_> {
    pub fn number(&self) -> Option<f64> {
        match self {
            Cell::Text(_) => None,
            Cell::Count(n) | Cell::Price(n) => *n,
        }
    }

    /// Text form used in CSV output. Whole counts print without a
    /// fraction (`3`), prices always carry one (`900000.0`).
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.to_string(),
            Cell::Count(None) | Cell::Price(None) => String::new(),
            Cell::Count(Some(n)) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Count(Some(n)) => n.to_string(),
            Cell::Price(Some(n)) if n.fract() == 0.0 => format!("{n:.1}"),
            Cell::Price(Some(n)) => n.to_string(),
        }
    }
}

impl FlattenedListing {
    /// Cells in [`LISTING_COLUMNS`] order.
    pub fn cells(&self) -> [Cell<'_>; 12] {
        [
            Cell::Text(&self.suburb),
            Cell::Text(&self.address_display),
            Cell::Text(&self.property_type),
            Cell::Count(self.bedrooms),
            Cell::Count(self.bathrooms),
            Cell::Count(self.car_spaces),
            Cell::Count(self.land_size_sqm),
            Cell::Text(&self.sale_date),
            Cell::Text(&self.sold_price_display),
            Cell::Text(&self.id),
            Cell::Text(&self.url),
            Cell::Price(self.sold_price),
        ]
    }
}
