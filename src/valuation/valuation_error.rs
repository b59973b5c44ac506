// src/valuation/valuation_error.rs
use thiserror::Error;

/// A valuation that cannot be computed from what the user has entered so
/// far. The page shows these as disabled actions or "Not enough data".
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValuationError {
    #[error("acreage must be greater than zero")]
    MissingAcreage,

    #[error("a price is required")]
    MissingPrice,

    #[error("at most {max} comparables can be averaged, got {count}")]
    TooManyComparables { count: usize, max: usize },

    #[error("not enough data")]
    InsufficientData,
}
