// src/valuation/result.rs
use crate::domain::Session;
use crate::valuation::{
    analyze_active_listing, estimate_market_value, evaluate_comparables, evaluate_subject,
    ActiveListingAnalysis, ComparableSummary, MarketEstimate, SubjectValuation, ValuationError,
};

/// Everything the valuation engine reports for a session. Recomputed from
/// scratch on every render; each part fails on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationResult {
    pub subject: Result<SubjectValuation, ValuationError>,
    pub comparables: Result<ComparableSummary, ValuationError>,
    pub market: Result<MarketEstimate, ValuationError>,
    pub active_listing: Result<ActiveListingAnalysis, ValuationError>,
}

pub fn evaluate_session(session: &Session) -> ValuationResult {
    ValuationResult {
        subject: evaluate_subject(&session.subject),
        comparables: evaluate_comparables(&session.comps),
        market: estimate_market_value(&session.subject, &session.comps),
        active_listing: analyze_active_listing(&session.active_listing),
    }
}
