// src/calculators/offer.rs
use crate::calculators::CalcError;

/// Each adjustment factor is a percentage in `-FACTOR_LIMIT..=FACTOR_LIMIT`.
pub const FACTOR_LIMIT: f64 = 50.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Adjustments {
    pub location: f64,
    pub development: f64,
    pub access: f64,
    pub utilities: f64,
}

impl Adjustments {
    pub fn clamped(self) -> Self {
        let clamp = |v: f64| {
            if v.is_finite() {
                v.clamp(-FACTOR_LIMIT, FACTOR_LIMIT)
            } else {
                0.0
            }
        };
        Self {
            location: clamp(self.location),
            development: clamp(self.development),
            access: clamp(self.access),
            utilities: clamp(self.utilities),
        }
    }

    /// Sum of the factors, in percent.
    pub fn total(&self) -> f64 {
        self.location + self.development + self.access + self.utilities
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferComparable {
    pub address: String,
    pub acreage: f64,
    pub sale_price: f64,
}

impl OfferComparable {
    pub fn price_per_acre(&self) -> Option<f64> {
        (self.acreage > 0.0 && self.sale_price.is_finite()).then(|| self.sale_price / self.acreage)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferInput {
    pub acreage: f64,
    pub comparables: Vec<OfferComparable>,
    pub adjustments: Adjustments,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandOffer {
    pub avg_price_per_acre: f64,
    pub base_price: f64,
    /// The factors actually applied, after clamping.
    pub adjustments: Adjustments,
    pub total_adjustment: f64,
    pub final_offer: f64,
}

/// Offer price from the comparables' average price per acre, scaled to
/// the property and adjusted by the four factors.
pub fn calculate_offer(input: &OfferInput) -> Result<LandOffer, CalcError> {
    if !input.acreage.is_finite() || input.acreage <= 0.0 {
        return Err(CalcError::NotPositive("acreage"));
    }

    let per_acre: Vec<f64> = input
        .comparables
        .iter()
        .filter_map(OfferComparable::price_per_acre)
        .collect();
    if per_acre.is_empty() {
        return Err(CalcError::InsufficientData);
    }

    let avg_price_per_acre = per_acre.iter().sum::<f64>() / per_acre.len() as f64;
    let base_price = avg_price_per_acre * input.acreage;
    let adjustments = input.adjustments.clamped();
    let total_adjustment = adjustments.total();

    Ok(LandOffer {
        avg_price_per_acre,
        base_price,
        adjustments,
        total_adjustment,
        final_offer: base_price * (1.0 + total_adjustment / 100.0),
    })
}
