// src/valuation/active.rs
use crate::domain::units::per_unit;
use crate::domain::PropertyRecord;
use crate::valuation::ValuationError;
use chrono::NaiveDate;

/// Asking figures for the competing listing, normalized per unit of land.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveListingAnalysis {
    pub list_price: f64,
    pub acres: f64,
    pub square_feet: Option<f64>,
    pub price_per_acre: f64,
    pub price_per_sqft: Option<f64>,
    pub days_on_market: Option<u32>,
    pub list_date: Option<NaiveDate>,
    pub status: Option<String>,
}

pub fn analyze_active_listing(
    listing: &PropertyRecord,
) -> Result<ActiveListingAnalysis, ValuationError> {
    let list_price = listing.price().ok_or(ValuationError::MissingPrice)?;
    let acres = listing
        .acres()
        .filter(|a| *a > 0.0)
        .ok_or(ValuationError::MissingAcreage)?;
    let price_per_acre = per_unit(list_price, acres).ok_or(ValuationError::MissingAcreage)?;
    let square_feet = listing.square_feet().filter(|s| *s > 0.0);

    Ok(ActiveListingAnalysis {
        list_price,
        acres,
        square_feet,
        price_per_acre,
        price_per_sqft: square_feet.and_then(|s| per_unit(list_price, s)),
        days_on_market: listing.days_on_market,
        list_date: listing.list_date,
        status: listing.status.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_the_list_price() {
        let mut listing = PropertyRecord::default();
        listing.set_acres(Some(2.0));
        listing.set_price(Some(150_000.0));
        listing.days_on_market = Some(30);

        let a = analyze_active_listing(&listing).unwrap();
        assert_eq!(a.price_per_acre, 75_000.0);
        assert_eq!(a.price_per_sqft, Some(1.72));
        assert_eq!(a.square_feet, Some(87_120.0));
        assert_eq!(a.days_on_market, Some(30));
    }

    #[test]
    fn needs_price_and_acreage() {
        let mut listing = PropertyRecord::default();
        assert_eq!(
            analyze_active_listing(&listing),
            Err(ValuationError::MissingPrice)
        );
        listing.set_price(Some(150_000.0));
        assert_eq!(
            analyze_active_listing(&listing),
            Err(ValuationError::MissingAcreage)
        );
    }
}
