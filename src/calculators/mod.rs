// src/calculators/mod.rs
mod amortization;
mod calc_error;
mod offer;

pub use amortization::{amortize, AmortizationSchedule, LoanTerms, PaymentRow, MAX_TERM_YEARS};
pub use calc_error::CalcError;
pub use offer::{calculate_offer, Adjustments, LandOffer, OfferComparable, OfferInput, FACTOR_LIMIT};
