// src/valuation/subject.rs
use crate::domain::{DebrisLevel, FloodZone, PropertyRecord, Slope, Trees};
use crate::valuation::ValuationError;

pub const HEAVY_DEBRIS_COST: f64 = 5_000.0;
pub const MODERATE_SLOPE_COST: f64 = 3_000.0;
pub const STEEP_SLOPE_COST: f64 = 7_000.0;
pub const MODERATE_TREES_COST: f64 = 4_000.0;
pub const HEAVY_TREES_COST: f64 = 8_000.0;
pub const WELL_COST: f64 = 15_000.0;
pub const SEPTIC_COST: f64 = 8_000.0;

/// One surcharge that went into the site-prep total.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePrepLine {
    pub label: &'static str,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectValuation {
    pub total_acres: f64,
    pub base_value: f64,
    pub flood_multiplier: f64,
    pub site_prep: Vec<SitePrepLine>,
    pub site_prep_cost: f64,
    pub adjusted_value: f64,
    pub final_value: f64,
    pub value_per_acre: f64,
    pub total_impact: f64,
    pub impact_percentage: f64,
}

/// Discount applied to the asking price for a floodplain classification.
/// No classification means no discount.
pub fn flood_multiplier(zone: Option<FloodZone>) -> f64 {
    match zone {
        None | Some(FloodZone::Clear) => 1.00,
        Some(FloodZone::HundredYear) => 0.85,
        Some(FloodZone::HundredYearWay) => 0.70,
        Some(FloodZone::FiveHundredYear) => 0.90,
        Some(FloodZone::CoastalHundredYear) => 0.80,
        Some(FloodZone::CoastalHundredYearWay) => 0.65,
        Some(FloodZone::Undetermined) => 0.95,
    }
}

/// Itemized site-prep surcharges. Moderate debris carries no cost.
pub fn site_prep_lines(subject: &PropertyRecord) -> Vec<SitePrepLine> {
    let mut lines = Vec::new();
    let mut push = |label, cost| lines.push(SitePrepLine { label, cost });

    if subject.debris_level == Some(DebrisLevel::Heavy) {
        push("Heavy debris removal", HEAVY_DEBRIS_COST);
    }
    match subject.slope {
        Some(Slope::Moderate) => push("Moderate slope grading", MODERATE_SLOPE_COST),
        Some(Slope::Steep) => push("Steep slope grading", STEEP_SLOPE_COST),
        _ => {}
    }
    match subject.trees {
        Some(Trees::Moderate) => push("Moderate tree clearing", MODERATE_TREES_COST),
        Some(Trees::Heavy) => push("Heavy tree clearing", HEAVY_TREES_COST),
        _ => {}
    }
    if subject.needs_well == Some(true) {
        push("Well installation", WELL_COST);
    }
    if subject.needs_septic == Some(true) {
        push("Septic system", SEPTIC_COST);
    }
    lines
}

/// Whether `evaluate_subject` has what it needs. The page disables the
/// calculate button otherwise.
pub fn can_evaluate(subject: &PropertyRecord) -> bool {
    preconditions(subject).is_ok()
}

fn preconditions(subject: &PropertyRecord) -> Result<(f64, f64), ValuationError> {
    let acres = subject
        .acres()
        .filter(|a| *a > 0.0)
        .ok_or(ValuationError::MissingAcreage)?;
    let price = subject.price().ok_or(ValuationError::MissingPrice)?;
    Ok((acres, price))
}

pub fn evaluate_subject(subject: &PropertyRecord) -> Result<SubjectValuation, ValuationError> {
    let (acres, price) = preconditions(subject)?;

    let site_prep = site_prep_lines(subject);
    let site_prep_cost: f64 = site_prep.iter().map(|l| l.cost).sum();
    let multiplier = flood_multiplier(subject.flood_zone);
    let adjusted_value = price * multiplier;
    let final_value = (adjusted_value - site_prep_cost).max(0.0);
    let total_impact = final_value - price;
    // A zero asking price has no meaningful percentage change.
    let impact_percentage = if price != 0.0 {
        total_impact / price * 100.0
    } else {
        0.0
    };

    Ok(SubjectValuation {
        total_acres: acres,
        base_value: price,
        flood_multiplier: multiplier,
        site_prep,
        site_prep_cost,
        adjusted_value,
        final_value,
        value_per_acre: final_value / acres,
        total_impact,
        impact_percentage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn subject(acres: f64, price: f64) -> PropertyRecord {
        let mut r = PropertyRecord::default();
        r.set_acres(Some(acres));
        r.set_price(Some(price));
        r
    }

    #[test]
    fn heavy_debris_in_hundred_year_floodplain() {
        let mut r = subject(2.0, 100_000.0);
        r.flood_zone = Some(FloodZone::HundredYear);
        r.debris_level = Some(DebrisLevel::Heavy);

        let v = evaluate_subject(&r).unwrap();
        assert_close(v.site_prep_cost, 5_000.0);
        assert_close(v.adjusted_value, 85_000.0);
        assert_close(v.final_value, 80_000.0);
        assert_close(v.value_per_acre, 40_000.0);
        assert_close(v.total_impact, -20_000.0);
        assert_close(v.impact_percentage, -20.0);
    }

    #[test]
    fn site_prep_costs_add_up() {
        let mut r = subject(5.0, 200_000.0);
        r.debris_level = Some(DebrisLevel::Heavy);
        r.slope = Some(Slope::Steep);
        r.trees = Some(Trees::Heavy);
        r.needs_well = Some(true);
        r.needs_septic = Some(true);

        let v = evaluate_subject(&r).unwrap();
        assert_eq!(v.site_prep.len(), 5);
        assert_close(v.site_prep_cost, 43_000.0);
    }

    #[test]
    fn moderate_debris_is_free_but_moderate_slope_and_trees_are_not() {
        let mut r = subject(1.0, 50_000.0);
        r.debris_level = Some(DebrisLevel::Moderate);
        assert_close(evaluate_subject(&r).unwrap().site_prep_cost, 0.0);

        r.slope = Some(Slope::Moderate);
        r.trees = Some(Trees::Moderate);
        assert_close(evaluate_subject(&r).unwrap().site_prep_cost, 7_000.0);
    }

    #[test]
    fn every_flood_zone_applies_its_multiplier() {
        let expected = [
            (FloodZone::Clear, 1.00),
            (FloodZone::HundredYear, 0.85),
            (FloodZone::HundredYearWay, 0.70),
            (FloodZone::FiveHundredYear, 0.90),
            (FloodZone::CoastalHundredYear, 0.80),
            (FloodZone::CoastalHundredYearWay, 0.65),
            (FloodZone::Undetermined, 0.95),
        ];
        for (zone, multiplier) in expected {
            let mut r = subject(1.0, 100_000.0);
            r.flood_zone = Some(zone);
            let v = evaluate_subject(&r).unwrap();
            assert_eq!(v.adjusted_value, 100_000.0 * multiplier, "{zone}");
        }

        let v = evaluate_subject(&subject(1.0, 100_000.0)).unwrap();
        assert_eq!(v.flood_multiplier, 1.0);
        assert_eq!(v.adjusted_value, 100_000.0);
    }

    #[test]
    fn final_value_never_goes_negative() {
        let mut r = subject(1.0, 10_000.0);
        r.needs_well = Some(true);
        let v = evaluate_subject(&r).unwrap();
        assert_eq!(v.final_value, 0.0);
        assert_close(v.impact_percentage, -100.0);
    }

    #[test]
    fn refuses_without_acreage_or_price() {
        let mut r = PropertyRecord::default();
        r.set_price(Some(10_000.0));
        assert_eq!(evaluate_subject(&r), Err(ValuationError::MissingAcreage));
        assert!(!can_evaluate(&r));

        r.set_acres(Some(0.0));
        assert_eq!(evaluate_subject(&r), Err(ValuationError::MissingAcreage));

        let mut r = PropertyRecord::default();
        r.set_acres(Some(2.0));
        assert_eq!(evaluate_subject(&r), Err(ValuationError::MissingPrice));
        assert!(can_evaluate(&subject(2.0, 1.0)));
    }
}
