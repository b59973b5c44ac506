// src/templates/pages/mod.rs
pub mod amortization;
pub mod calculator;
pub mod offer;

pub use amortization::{amortization_page, AmortizationVm};
pub use calculator::{calculator_page, CalculatorVm, SlotNotice, PARSE_FAILURE_MESSAGE};
pub use offer::{offer_page, OfferVm, OFFER_COMPARABLE_ROWS};
