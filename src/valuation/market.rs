// src/valuation/market.rs
use crate::domain::PropertyRecord;
use crate::valuation::comparables::{evaluate_comparables, Average};
use crate::valuation::ValuationError;

/// Breakdown rows, highest percentage first.
pub const BREAKDOWN_PERCENTAGES: [u32; 9] = [90, 80, 70, 60, 50, 40, 30, 20, 10];

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub percentage: u32,
    pub value: f64,
    pub per_sqft: f64,
    /// Absent when the subject's acreage is unknown.
    pub per_acre: Option<f64>,
}

/// How the estimate sits against the subject's asking price, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AskingComparison {
    Above(f64),
    Below(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketEstimate {
    pub avg_price_per_sqft: f64,
    pub subject_square_feet: f64,
    pub subject_acres: Option<f64>,
    pub estimated_value: f64,
    pub breakdown: Vec<BreakdownRow>,
    pub asking_comparison: Option<AskingComparison>,
}

/// Value the subject at the comparables' average price per square foot.
pub fn estimate_market_value(
    subject: &PropertyRecord,
    comps: &[PropertyRecord],
) -> Result<MarketEstimate, ValuationError> {
    let summary = evaluate_comparables(comps)?;
    let avg_price_per_sqft = match summary.averages.price_per_sqft {
        Average::Value(v) if v != 0.0 => v,
        _ => return Err(ValuationError::InsufficientData),
    };
    let subject_square_feet = subject
        .square_feet()
        .filter(|s| *s > 0.0)
        .ok_or(ValuationError::InsufficientData)?;
    let subject_acres = subject.acres().filter(|a| *a > 0.0);

    let estimated_value = avg_price_per_sqft * subject_square_feet;
    let breakdown = BREAKDOWN_PERCENTAGES
        .iter()
        .map(|&pct| {
            let value = estimated_value * f64::from(pct) / 100.0;
            BreakdownRow {
                percentage: pct,
                value,
                per_sqft: value / subject_square_feet,
                per_acre: subject_acres.map(|a| value / a),
            }
        })
        .collect();

    let asking_comparison = subject
        .price()
        .filter(|p| *p > 0.0)
        .and_then(|price| compare_to_asking(estimated_value, price));

    Ok(MarketEstimate {
        avg_price_per_sqft,
        subject_square_feet,
        subject_acres,
        estimated_value,
        breakdown,
        asking_comparison,
    })
}

fn compare_to_asking(estimate: f64, price: f64) -> Option<AskingComparison> {
    if estimate > price {
        Some(AskingComparison::Above((estimate / price - 1.0) * 100.0))
    } else if estimate > 0.0 {
        Some(AskingComparison::Below((price / estimate - 1.0) * 100.0))
    } else {
        None
    }
}
