// src/extractor/mod.rs
mod address;
mod extract_error;
mod extractor;
mod rules;

pub use extract_error::ExtractError;
pub use extractor::{ListingExtractor, DEFAULT_MAX_INPUT_BYTES};
