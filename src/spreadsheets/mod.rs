// src/spreadsheets/mod.rs
pub mod report_xlsx;

pub use report_xlsx::{export_report_xlsx, REPORT_FILENAME};
