// src/calculators/calc_error.rs
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("{0} is out of range")]
    OutOfRange(&'static str),

    #[error("not enough data")]
    InsufficientData,
}
