// src/valuation/comparables.rs
use crate::domain::PropertyRecord;
use crate::valuation::ValuationError;
use chrono::NaiveDate;

pub const MAX_COMPARABLES: usize = 3;

/// Column mean, or a marker when no comparable has the column filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Average {
    Value(f64),
    InsufficientData,
}

impl Average {
    /// Straight arithmetic mean over the values that are present.
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let (sum, count) = values
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

        if count == 0 {
            Average::InsufficientData
        } else {
            Average::Value(sum / count as f64)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Average::Value(v) => Some(v),
            Average::InsufficientData => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparableRow {
    pub address: Option<String>,
    pub price: Option<f64>,
    pub square_feet: Option<f64>,
    pub price_per_sqft: Option<f64>,
    pub acres: Option<f64>,
    pub price_per_acre: Option<f64>,
    pub days_on_market: Option<u32>,
    pub close_date: Option<NaiveDate>,
}

impl From<&PropertyRecord> for ComparableRow {
    fn from(r: &PropertyRecord) -> Self {
        Self {
            address: r.address.clone(),
            price: r.price(),
            square_feet: r.square_feet(),
            price_per_sqft: r.price_per_sqft(),
            acres: r.acres(),
            price_per_acre: r.price_per_acre(),
            days_on_market: r.days_on_market,
            close_date: r.close_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparableAverages {
    pub price: Average,
    pub square_feet: Average,
    pub price_per_sqft: Average,
    pub acres: Average,
    pub price_per_acre: Average,
    pub days_on_market: Average,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparableSummary {
    pub rows: Vec<ComparableRow>,
    pub averages: ComparableAverages,
}

pub fn evaluate_comparables(comps: &[PropertyRecord]) -> Result<ComparableSummary, ValuationError> {
    if comps.len() > MAX_COMPARABLES {
        return Err(ValuationError::TooManyComparables {
            count: comps.len(),
            max: MAX_COMPARABLES,
        });
    }

    let rows: Vec<ComparableRow> = comps.iter().map(ComparableRow::from).collect();
    let averages = ComparableAverages {
        price: column(&rows, |r| r.price),
        square_feet: column(&rows, |r| r.square_feet),
        price_per_sqft: column(&rows, |r| r.price_per_sqft),
        acres: column(&rows, |r| r.acres),
        price_per_acre: column(&rows, |r| r.price_per_acre),
        days_on_market: column(&rows, |r| r.days_on_market.map(f64::from)),
    };

    Ok(ComparableSummary { rows, averages })
}

fn column(rows: &[ComparableRow], get: fn(&ComparableRow) -> Option<f64>) -> Average {
    Average::of(rows.iter().map(get))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp_with_pps(pps: Option<f64>) -> PropertyRecord {
        let mut r = PropertyRecord::default();
        r.set_price_per_sqft(pps);
        r
    }

    #[test]
    fn averages_skip_missing_values() {
        let comps = [
            comp_with_pps(Some(10.0)),
            comp_with_pps(None),
            comp_with_pps(Some(20.0)),
        ];
        let summary = evaluate_comparables(&comps).unwrap();
        assert_eq!(summary.averages.price_per_sqft, Average::Value(15.0));
        assert_eq!(summary.rows.len(), 3);
    }

    #[test]
    fn empty_columns_report_insufficient_data() {
        let summary = evaluate_comparables(&[PropertyRecord::default()]).unwrap();
        assert_eq!(summary.averages.price, Average::InsufficientData);
        assert_eq!(summary.averages.acres.value(), None);

        let summary = evaluate_comparables(&[]).unwrap();
        assert_eq!(summary.averages.price_per_acre, Average::InsufficientData);
    }

    #[test]
    fn mixed_columns_average_independently() {
        let mut a = PropertyRecord::default();
        a.set_acres(Some(2.0));
        a.set_price(Some(100_000.0));
        a.days_on_market = Some(10);
        let mut b = PropertyRecord::default();
        b.set_acres(Some(4.0));
        b.days_on_market = Some(30);

        let summary = evaluate_comparables(&[a, b]).unwrap();
        assert_eq!(summary.averages.acres, Average::Value(3.0));
        assert_eq!(summary.averages.price, Average::Value(100_000.0));
        assert_eq!(summary.averages.price_per_acre, Average::Value(50_000.0));
        assert_eq!(summary.averages.days_on_market, Average::Value(20.0));
    }

    #[test]
    fn more_than_three_comparables_is_an_error() {
        let comps = vec![PropertyRecord::default(); 4];
        assert_eq!(
            evaluate_comparables(&comps),
            Err(ValuationError::TooManyComparables { count: 4, max: 3 })
        );
    }
}
