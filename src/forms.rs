// src/forms.rs
use crate::calculators::{Adjustments, LoanTerms, OfferComparable, OfferInput};
use crate::domain::units::{parse_iso_date, parse_number, parse_us_date};
use crate::domain::{DebrisLevel, FloodZone, PropertyRecord, Slope, Trees};
use chrono::NaiveDate;
use tracing::debug;

/// A decoded `application/x-www-form-urlencoded` body, in submission
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    pairs: Vec<(String, String)>,
}

impl Form {
    pub fn parse(body: &[u8]) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(parse_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Apply a submitted edit form to a slot.
///
/// Only fields whose submitted value differs from what the page showed
/// are applied, in form order, through the record's setters. Editing
/// price per acre therefore recomputes the price without the stale price
/// field undoing it. An emptied field clears the value; text that is not
/// a number leaves the field alone.
pub fn apply_slot_edits(record: &mut PropertyRecord, form: &Form) {
    let before = record.clone();

    for (name, raw) in form.iter() {
        let raw = raw.trim();
        match name {
            "address" => record.address = text(raw),
            "status" => record.status = text(raw),
            "acres" => {
                if let Some(v) = changed_number(raw, before.acres()) {
                    record.set_acres(v);
                }
            }
            "square_feet" => {
                if let Some(v) = changed_number(raw, before.square_feet()) {
                    record.set_square_feet(v);
                }
            }
            "price" => {
                if let Some(v) = changed_number(raw, before.price()) {
                    record.set_price(v);
                }
            }
            "price_per_acre" => {
                if let Some(v) = changed_number(raw, before.price_per_acre()) {
                    record.set_price_per_acre(v);
                }
            }
            "price_per_sqft" => {
                if let Some(v) = changed_number(raw, before.price_per_sqft()) {
                    record.set_price_per_sqft(v);
                }
            }
            "appraisal_value" => {
                if let Some(v) = changed_number(raw, before.appraisal_value) {
                    record.appraisal_value = v;
                }
            }
            "days_on_market" => {
                if raw.is_empty() {
                    record.days_on_market = None;
                } else if let Ok(n) = raw.parse() {
                    record.days_on_market = Some(n);
                }
            }
            "close_date" => {
                if let Some(d) = date(raw) {
                    record.close_date = d;
                }
            }
            "list_date" => {
                if let Some(d) = date(raw) {
                    record.list_date = d;
                }
            }
            "debris_level" => {
                if let Some(v) = choice(raw, DebrisLevel::from_code) {
                    record.debris_level = v;
                }
            }
            "slope" => {
                if let Some(v) = choice(raw, Slope::from_code) {
                    record.slope = v;
                }
            }
            "trees" => {
                if let Some(v) = choice(raw, Trees::from_code) {
                    record.trees = v;
                }
            }
            "flood_zone" => {
                if let Some(v) = choice(raw, FloodZone::from_code) {
                    record.flood_zone = v;
                }
            }
            "needs_well" => {
                if let Some(v) = flag(raw) {
                    record.needs_well = v;
                }
            }
            "needs_septic" => {
                if let Some(v) = flag(raw) {
                    record.needs_septic = v;
                }
            }
            other => debug!(field = other, "ignoring unknown form field"),
        }
    }
}

fn text(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

/// `Some(new)` when the field should be written, `None` to leave it.
fn changed_number(raw: &str, shown: Option<f64>) -> Option<Option<f64>> {
    if raw.is_empty() {
        return shown.is_some().then_some(None);
    }
    match parse_number(raw) {
        Some(v) if shown != Some(v) => Some(Some(v)),
        _ => None,
    }
}

fn date(raw: &str) -> Option<Option<NaiveDate>> {
    if raw.is_empty() {
        return Some(None);
    }
    parse_iso_date(raw).or_else(|| parse_us_date(raw)).map(Some)
}

fn choice<T>(raw: &str, from_code: fn(&str) -> Option<T>) -> Option<Option<T>> {
    if raw.is_empty() {
        return Some(None);
    }
    from_code(raw).map(Some)
}

fn flag(raw: &str) -> Option<Option<bool>> {
    match raw {
        "" => Some(None),
        "yes" => Some(Some(true)),
        "no" => Some(Some(false)),
        _ => None,
    }
}

/// Offer calculator inputs. Comparable rows are `comp1_*`, `comp2_*`, ...
/// and rows left entirely blank are dropped.
pub fn offer_input(form: &Form, rows: usize) -> OfferInput {
    let comparables = (1..=rows)
        .filter_map(|i| {
            let address = form.get(&format!("comp{i}_address")).unwrap_or_default().trim();
            let acreage = form.number(&format!("comp{i}_acreage"));
            let sale_price = form.number(&format!("comp{i}_sale_price"));
            if address.is_empty() && acreage.is_none() && sale_price.is_none() {
                return None;
            }
            Some(OfferComparable {
                address: address.to_string(),
                acreage: acreage.unwrap_or_default(),
                sale_price: sale_price.unwrap_or_default(),
            })
        })
        .collect();

    OfferInput {
        acreage: form.number("acreage").unwrap_or_default(),
        comparables,
        adjustments: Adjustments {
            location: form.number("location").unwrap_or_default(),
            development: form.number("development").unwrap_or_default(),
            access: form.number("access").unwrap_or_default(),
            utilities: form.number("utilities").unwrap_or_default(),
        },
    }
}

/// Loan inputs. A term that is not a whole number of years reads as zero
/// and is rejected by the calculator.
pub fn loan_terms(form: &Form) -> LoanTerms {
    let years = form
        .number("years")
        .filter(|y| y.fract() == 0.0 && *y >= 0.0 && *y <= f64::from(u32::MAX))
        .map(|y| y as u32)
        .unwrap_or_default();

    LoanTerms {
        principal: form.number("principal").unwrap_or_default(),
        annual_rate: form.number("annual_rate").unwrap_or_default(),
        years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(body: &str) -> Form {
        Form::parse(body.as_bytes())
    }

    fn priced_two_acres() -> PropertyRecord {
        let mut r = PropertyRecord::default();
        r.set_acres(Some(2.0));
        r.set_price(Some(100_000.0));
        r
    }

    #[test]
    fn decodes_urlencoded_pairs_in_order() {
        let f = form("text=Acres%3A+2%0ALot+Size&x=1&x=2");
        assert_eq!(f.get("text"), Some("Acres: 2\nLot Size"));
        assert_eq!(f.get("x"), Some("1"));
        assert_eq!(f.iter().count(), 3);
        assert_eq!(f.number("missing"), None);
    }

    #[test]
    fn edited_price_per_acre_wins_over_stale_fields() {
        let mut r = priced_two_acres();
        let f = form(
            "acres=2&square_feet=87120&price=100000&price_per_acre=60000&price_per_sqft=1.15",
        );
        apply_slot_edits(&mut r, &f);

        assert_eq!(r.price(), Some(120_000.0));
        assert_eq!(r.price_per_acre(), Some(60_000.0));
        assert_eq!(r.price_per_sqft(), Some(1.38));
    }

    #[test]
    fn edited_acreage_recomputes_square_feet() {
        let mut r = priced_two_acres();
        apply_slot_edits(&mut r, &form("acres=3&square_feet=87120&price=100000"));
        assert_eq!(r.acres(), Some(3.0));
        assert_eq!(r.square_feet(), Some(130_680.0));
        assert_eq!(r.price_per_acre(), Some(33_333.33));
    }

    #[test]
    fn emptied_field_clears_and_junk_is_ignored() {
        let mut r = priced_two_acres();
        apply_slot_edits(&mut r, &form("price=&acres=lots"));
        assert_eq!(r.price(), None);
        assert_eq!(r.acres(), Some(2.0));
    }

    #[test]
    fn choices_and_flags() {
        let mut r = PropertyRecord::default();
        apply_slot_edits(
            &mut r,
            &form("debris_level=heavy&slope=steep&flood_zone=500-year&needs_well=yes&needs_septic=no&close_date=2024-03-07"),
        );
        assert_eq!(r.debris_level, Some(DebrisLevel::Heavy));
        assert_eq!(r.slope, Some(Slope::Steep));
        assert_eq!(r.flood_zone, Some(FloodZone::FiveHundredYear));
        assert_eq!(r.needs_well, Some(true));
        assert_eq!(r.needs_septic, Some(false));
        assert_eq!(r.close_date, NaiveDate::from_ymd_opt(2024, 3, 7));

        apply_slot_edits(&mut r, &form("slope=cliff&flood_zone="));
        assert_eq!(r.slope, Some(Slope::Steep));
        assert_eq!(r.flood_zone, None);
    }

    #[test]
    fn offer_rows_skip_blank_comparables() {
        let f = form("acreage=10&comp1_acreage=2&comp1_sale_price=%2420%2C000&comp2_address=&comp3_address=9+Elm&location=-80");
        let input = offer_input(&f, 5);
        assert_eq!(input.acreage, 10.0);
        assert_eq!(input.comparables.len(), 2);
        assert_eq!(input.comparables[0].sale_price, 20_000.0);
        assert_eq!(input.comparables[1].address, "9 Elm");
        assert_eq!(input.adjustments.location, -80.0);
    }

    #[test]
    fn loan_terms_need_whole_years() {
        let terms = loan_terms(&form("principal=100%2C000&annual_rate=6.5&years=30"));
        assert_eq!(terms.principal, 100_000.0);
        assert_eq!(terms.annual_rate, 6.5);
        assert_eq!(terms.years, 30);

        assert_eq!(loan_terms(&form("years=2.5")).years, 0);
    }
}
