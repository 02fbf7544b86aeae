pub mod listing;
pub mod listing_set;
