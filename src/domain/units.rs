// src/domain/units.rs

use chrono::NaiveDate;

pub const SQUARE_FEET_PER_ACRE: f64 = 43_560.0;

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Acreage for a square-foot figure, kept at 4 decimal places.
pub fn acres_from_sqft(square_feet: f64) -> f64 {
    round_to(square_feet / SQUARE_FEET_PER_ACRE, 4)
}

/// Square footage for an acreage figure, kept at whole feet.
pub fn sqft_from_acres(acres: f64) -> f64 {
    (acres * SQUARE_FEET_PER_ACRE).round()
}

/// Money-per-unit figures are kept at cents.
pub fn per_unit(total: f64, units: f64) -> Option<f64> {
    if units > 0.0 && total.is_finite() {
        Some(round_to(total / units, 2))
    } else {
        None
    }
}

/// Parse a number as it appears in listing text or a form field.
///
/// Thousands separators, `$` and surrounding whitespace are dropped and a
/// bare leading decimal (".25") is read as "0.25". Anything else that does
/// not parse to a finite value is treated as absent.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.starts_with('.') {
        format!("0{cleaned}")
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an MLS style `MM/DD/YYYY` (or `MM/DD/YY`) date.
pub fn parse_us_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let mut parts = raw.split('/');
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let year_part = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }

    let year: i32 = match year_part.len() {
        4 => year_part.parse().ok()?,
        2 => 2000 + year_part.parse::<i32>().ok()?,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse an ISO `YYYY-MM-DD` date as submitted by a date input.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
