mod body;
mod classifier;
mod embedded;
mod flatten;
mod pattern_error;
mod price;

pub use body::BodyKind;
pub use classifier::{
    find_candidate_arrays, ArrayScan, CandidateArray, JsonPath, ListingHeuristic, PathSegment,
};
pub use embedded::{EmbeddedExtractor, EmbeddedPatterns};
pub use flatten::flatten_listing;
pub use pattern_error::PatternError;
pub use price::{parse_price, parse_price_text};
