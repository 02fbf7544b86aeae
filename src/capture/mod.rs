mod capture_error;
mod har;
mod models;
mod probe;

pub use capture_error::CaptureError;
pub use har::{read_capture, Capture, CaptureEntry};
pub use probe::{probe_capture, ProbeSummary};
