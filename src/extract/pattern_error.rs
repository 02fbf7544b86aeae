use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid embedded-JSON pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("invalid selector: {0}")]
    Selector(String),
}
