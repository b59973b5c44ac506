// src/extractor/extractor.rs
use crate::domain::units::{acres_from_sqft, per_unit, sqft_from_acres};
use crate::domain::{PartialPropertyRecord, SlotRole};
use crate::extractor::address::AddressPatterns;
use crate::extractor::rules::{rule_table, Field, Precedence, Rule, Value};
use crate::extractor::ExtractError;
use std::collections::HashSet;
use tracing::debug;

/// Large enough for any MLS print-out pasted by hand.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;

/// Turns pasted listing text into whatever structured fields it mentions.
///
/// One extractor serves every slot; the role picks which label
/// vocabulary applies. Build it once and share it, the patterns are
/// compiled up front.
#[derive(Debug)]
pub struct ListingExtractor {
    rules: Vec<Rule>,
    address: AddressPatterns,
    max_input_bytes: usize,
}

impl ListingExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            rules: rule_table()?,
            address: AddressPatterns::new()?,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        })
    }

    pub fn with_max_input_bytes(mut self, max: usize) -> Self {
        self.max_input_bytes = max;
        self
    }

    pub fn extract(&self, raw: &str, role: SlotRole) -> Result<PartialPropertyRecord, ExtractError> {
        if raw.len() > self.max_input_bytes {
            return Err(ExtractError::InputTooLarge {
                len: raw.len(),
                max: self.max_input_bytes,
            });
        }
        if raw.contains('\0') {
            return Err(ExtractError::NotText);
        }

        let lines: Vec<&str> = raw.lines().map(str::trim).collect();
        let mut draft = Draft::default();
        draft.record.address = self.address.find(&lines);

        for line in lines.iter().filter(|l| !l.is_empty()) {
            let lower = line.to_lowercase();
            if lower.contains("address:") {
                continue;
            }
            for rule in self.rules.iter().filter(|r| r.applies_to(role)) {
                if rule.precedence == Precedence::FirstMatch && draft.is_explicit(rule.field) {
                    continue;
                }
                if let Some(value) = rule.evaluate(line, &lower) {
                    debug!(rule = rule.name, ?value, "listing rule matched");
                    draft.apply(rule.field, value);
                }
            }
        }

        let mut record = draft.record;
        derive_per_unit(&mut record);
        ensure_finite(&record)?;
        Ok(record)
    }
}

/// The record under construction, plus which fields came straight from
/// the text. Area counterparts filled by conversion are derived and may be
/// replaced by a later explicit figure.
#[derive(Default)]
struct Draft {
    record: PartialPropertyRecord,
    explicit: HashSet<Field>,
}

impl Draft {
    fn is_explicit(&self, field: Field) -> bool {
        self.explicit.contains(&field)
    }

    fn apply(&mut self, field: Field, value: Value) {
        let r = &mut self.record;
        match (field, value) {
            (Field::Acres, Value::Number(acres)) => {
                r.acres = Some(acres);
                if r.square_feet.is_none() {
                    r.square_feet = Some(sqft_from_acres(acres));
                }
            }
            (Field::SquareFeet, Value::Number(sqft)) => {
                r.square_feet = Some(sqft);
                if r.acres.is_none() {
                    r.acres = Some(acres_from_sqft(sqft));
                }
            }
            (Field::Price, Value::Number(v)) => r.price = Some(v),
            (Field::AppraisalValue, Value::Number(v)) => r.appraisal_value = Some(v),
            (Field::PricePerSqFt, Value::Number(v)) => r.price_per_sqft = Some(v),
            (Field::PricePerAcre, Value::Number(v)) => r.price_per_acre = Some(v),
            (Field::DaysOnMarket, Value::Count(n)) => r.days_on_market = Some(n),
            (Field::CloseDate, Value::Date(d)) => r.close_date = Some(d),
            (Field::ListDate, Value::Date(d)) => r.list_date = Some(d),
            (Field::Status, Value::Text(s)) => r.status = Some(s),
            (Field::Debris, Value::Debris(d)) => r.debris_level = Some(d),
            (Field::Slope, Value::Slope(s)) => r.slope = Some(s),
            (Field::Trees, Value::Trees(t)) => r.trees = Some(t),
            (Field::NeedsWell, Value::Flag) => r.needs_well = Some(true),
            (Field::NeedsSeptic, Value::Flag) => r.needs_septic = Some(true),
            (Field::FloodZone, Value::Flood(z)) => r.flood_zone = Some(z),
            (field, value) => {
                debug!(?field, ?value, "rule produced a value of the wrong kind");
                return;
            }
        }
        self.explicit.insert(field);
    }
}

/// Fill per-unit figures the text did not state.
fn derive_per_unit(r: &mut PartialPropertyRecord) {
    let Some(price) = r.price else {
        return;
    };
    if r.price_per_acre.is_none() {
        r.price_per_acre = r.acres.and_then(|a| per_unit(price, a));
    }
    if r.price_per_sqft.is_none() {
        r.price_per_sqft = r.square_feet.and_then(|s| per_unit(price, s));
    }
}

fn ensure_finite(r: &PartialPropertyRecord) -> Result<(), ExtractError> {
    let numbers = [
        ("acres", r.acres),
        ("square feet", r.square_feet),
        ("price", r.price),
        ("appraisal value", r.appraisal_value),
        ("price per sq ft", r.price_per_sqft),
        ("price per acre", r.price_per_acre),
    ];
    match numbers
        .into_iter()
        .find(|(_, v)| v.is_some_and(|v| !v.is_finite()))
    {
        Some((field, _)) => Err(ExtractError::NonFinite { field }),
        None => Ok(()),
    }
}
