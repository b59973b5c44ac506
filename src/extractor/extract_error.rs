// src/extractor/extract_error.rs
use thiserror::Error;

/// A paste the extractor refused. Nothing from a failed parse reaches the
/// record being edited.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("input is {len} bytes, the limit is {max}")]
    InputTooLarge { len: usize, max: usize },

    #[error("input is not plain text")]
    NotText,

    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}
