// src/valuation/mod.rs
mod active;
mod comparables;
mod market;
mod result;
mod subject;
mod valuation_error;

pub use active::{analyze_active_listing, ActiveListingAnalysis};
pub use comparables::{
    evaluate_comparables, Average, ComparableAverages, ComparableRow, ComparableSummary,
    MAX_COMPARABLES,
};
pub use market::{
    estimate_market_value, AskingComparison, BreakdownRow, MarketEstimate, BREAKDOWN_PERCENTAGES,
};
pub use result::{evaluate_session, ValuationResult};
pub use subject::{
    can_evaluate, evaluate_subject, flood_multiplier, site_prep_lines, SitePrepLine,
    SubjectValuation,
};
pub use valuation_error::ValuationError;
