// errors.rs
use crate::capture::CaptureError;
use crate::config::ConfigError;
use crate::extract::PatternError;
use crate::spreadsheets::ExportError;
use thiserror::Error;

/// Everything that can stop a run. Problems inside a single capture entry
/// never surface here; they are skipped where they happen.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
