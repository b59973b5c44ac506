// src/extractor/rules.rs
//
// The field pass is driven by one ordered table. For every line, rules are
// tried top to bottom; a `FirstMatch` rule is skipped once its field holds
// a value taken from the text, a `LastMatch` rule overwrites.

use crate::domain::units::{parse_number, parse_us_date};
use crate::domain::{DebrisLevel, FloodZone, Slope, SlotRole, Trees};
use chrono::NaiveDate;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Acres,
    SquareFeet,
    Price,
    AppraisalValue,
    DaysOnMarket,
    PricePerSqFt,
    PricePerAcre,
    CloseDate,
    ListDate,
    Status,
    Debris,
    Slope,
    Trees,
    NeedsWell,
    NeedsSeptic,
    FloodZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    FirstMatch,
    LastMatch,
}

/// How the first capture group of a pattern is read.
#[derive(Debug, Clone, Copy)]
pub enum Capture {
    Number,
    Count,
    Date,
    Text,
}

#[derive(Debug)]
pub enum Matcher {
    /// Regex with one capture group. The match is dropped when the text
    /// right after it starts with one of `not_before` (e.g. "Lot Size: 2
    /// acres" is not a square-foot figure).
    Pattern {
        regex: Regex,
        capture: Capture,
        not_before: &'static [&'static str],
    },
    /// The guard keywords alone set the flag.
    Keywords,
    /// heavy / steep / moderate qualifiers on the same line.
    Qualifier,
    FloodZone,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Count(u32),
    Date(NaiveDate),
    Text(String),
    Debris(DebrisLevel),
    Slope(Slope),
    Trees(Trees),
    Flag,
    Flood(FloodZone),
}

#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub field: Field,
    pub precedence: Precedence,
    pub roles: &'static [SlotRole],
    /// Lowercased keywords; at least one must appear (empty = no guard).
    pub requires: &'static [&'static str],
    /// Lowercased keywords; none may appear.
    pub excludes: &'static [&'static str],
    pub matcher: Matcher,
}

impl Rule {
    pub fn applies_to(&self, role: SlotRole) -> bool {
        self.roles.contains(&role)
    }

    /// Try the rule on one trimmed line. `lower` is the same line
    /// lowercased.
    pub fn evaluate(&self, line: &str, lower: &str) -> Option<Value> {
        if !self.requires.is_empty() && !self.requires.iter().any(|k| lower.contains(k)) {
            return None;
        }
        if self.excludes.iter().any(|k| lower.contains(k)) {
            return None;
        }

        match &self.matcher {
            Matcher::Pattern {
                regex,
                capture,
                not_before,
            } => {
                let caps = regex.captures(line)?;
                let whole = caps.get(0)?;
                let rest = line[whole.end()..].trim_start().to_lowercase();
                if not_before.iter().any(|w| rest.starts_with(w)) {
                    return None;
                }
                read_capture(*capture, caps.get(1)?.as_str())
            }
            Matcher::Keywords => Some(Value::Flag),
            Matcher::Qualifier => qualify(self.field, lower),
            Matcher::FloodZone => Some(Value::Flood(classify_flood_zone(lower))),
        }
    }
}

fn read_capture(capture: Capture, raw: &str) -> Option<Value> {
    match capture {
        Capture::Number => parse_number(raw).map(Value::Number),
        Capture::Count => raw.trim().parse().ok().map(Value::Count),
        Capture::Date => parse_us_date(raw).map(Value::Date),
        Capture::Text => {
            let text = raw.trim();
            (!text.is_empty()).then(|| Value::Text(text.to_string()))
        }
    }
}

fn qualify(field: Field, lower: &str) -> Option<Value> {
    let heavy = lower.contains("heavy");
    let moderate = lower.contains("moderate");
    match field {
        Field::Debris if heavy => Some(Value::Debris(DebrisLevel::Heavy)),
        Field::Debris if moderate => Some(Value::Debris(DebrisLevel::Moderate)),
        Field::Slope if lower.contains("steep") => Some(Value::Slope(Slope::Steep)),
        Field::Slope if moderate => Some(Value::Slope(Slope::Moderate)),
        Field::Trees if heavy => Some(Value::Trees(Trees::Heavy)),
        Field::Trees if moderate => Some(Value::Trees(Trees::Moderate)),
        _ => None,
    }
}

/// Flood zone from a line already known to mention "flood". Checks run in
/// descending precedence.
pub fn classify_flood_zone(lower: &str) -> FloodZone {
    let coastal = lower.contains("coastal");
    let way = lower.contains("way");
    if coastal && way {
        FloodZone::CoastalHundredYearWay
    } else if coastal {
        FloodZone::CoastalHundredYear
    } else if lower.contains("500") {
        FloodZone::FiveHundredYear
    } else if way {
        FloodZone::HundredYearWay
    } else if lower.contains("100") {
        FloodZone::HundredYear
    } else if lower.contains("clear") {
        FloodZone::Clear
    } else {
        FloodZone::Undetermined
    }
}

const ALL: &[SlotRole] = &[
    SlotRole::Subject,
    SlotRole::Comparable,
    SlotRole::ActiveListing,
];
const SUBJECT: &[SlotRole] = &[SlotRole::Subject];
const COMPARABLE: &[SlotRole] = &[SlotRole::Comparable];
const ACTIVE: &[SlotRole] = &[SlotRole::ActiveListing];
const FREE_FORM: &[SlotRole] = &[SlotRole::Subject, SlotRole::ActiveListing];
const SOLD_OR_LISTED: &[SlotRole] = &[SlotRole::Comparable, SlotRole::ActiveListing];

const NUM: &str = r"(\d[\d,]*(?:\.\d+)?|\.\d+)";

/// Lines carrying a per-unit figure never feed a total or an area.
const PER_UNIT_LABELS: &[&str] = &[
    "lp/acre",
    "sp/acr",
    "lp/sf",
    "sp/sf",
    "price/acre",
    "price per acre",
    "$/acre",
    "price/sq",
    "price per sq",
    "$/sq",
];

struct RuleDef {
    name: &'static str,
    field: Field,
    roles: &'static [SlotRole],
    requires: &'static [&'static str],
    excludes: &'static [&'static str],
}

impl RuleDef {
    fn pattern(self, regex: &str, capture: Capture) -> Result<Rule, regex::Error> {
        self.pattern_not_before(regex, capture, &[])
    }

    fn pattern_not_before(
        self,
        regex: &str,
        capture: Capture,
        not_before: &'static [&'static str],
    ) -> Result<Rule, regex::Error> {
        Ok(self.with(Matcher::Pattern {
            regex: Regex::new(regex)?,
            capture,
            not_before,
        }))
    }

    fn with(self, matcher: Matcher) -> Rule {
        Rule {
            name: self.name,
            field: self.field,
            precedence: Precedence::FirstMatch,
            roles: self.roles,
            requires: self.requires,
            excludes: self.excludes,
            matcher,
        }
    }
}

fn def(
    name: &'static str,
    field: Field,
    roles: &'static [SlotRole],
    requires: &'static [&'static str],
    excludes: &'static [&'static str],
) -> RuleDef {
    RuleDef {
        name,
        field,
        roles,
        requires,
        excludes,
    }
}

/// Build the ordered rule table.
pub fn rule_table() -> Result<Vec<Rule>, regex::Error> {
    let mut flood =
        def("flood-zone", Field::FloodZone, ALL, &["flood"], &[]).with(Matcher::FloodZone);
    flood.precedence = Precedence::LastMatch;

    Ok(vec![
        // Area. Acreage comes first so an explicit figure is in place
        // before any square footage on the same line.
        def("acres-label", Field::Acres, ALL, &["acre:", "acres:"], &[]).pattern(
            &format!(r"(?i)(?:^|[^/\w])acres?:\s*{NUM}"),
            Capture::Number,
        )?,
        def("lot-size-acres", Field::Acres, ALL, &["lot size:"], &[])
            .pattern(&format!(r"(?i)lot size:\s*{NUM}\s*acres?\b"), Capture::Number)?,
        def("acres-free-form", Field::Acres, FREE_FORM, &["acre"], PER_UNIT_LABELS)
            .pattern(&format!(r"(?i){NUM}\s*acres?\b"), Capture::Number)?,
        def("lot-size", Field::SquareFeet, ALL, &["lot size:"], &[]).pattern_not_before(
            &format!(r"(?i)lot size:\s*{NUM}"),
            Capture::Number,
            &["acre"],
        )?,
        def("square-feet-label", Field::SquareFeet, FREE_FORM, &["sq", "square"], PER_UNIT_LABELS)
            .pattern(
                &format!(r"(?i)(?:sq\.?\s*ft\.?|sqft|square\s*feet)\s*:\s*\$?\s*{NUM}"),
                Capture::Number,
            )?,
        def("square-feet-free-form", Field::SquareFeet, FREE_FORM, &["sq", "square"], PER_UNIT_LABELS)
            .pattern(
                &format!(r"(?i){NUM}\s*(?:sq\.?\s*ft\.?|sqft|square\s*f(?:ee|oo)t)"),
                Capture::Number,
            )?,
        // Subject: asking price and appraisal.
        def(
            "appraisal-value",
            Field::AppraisalValue,
            SUBJECT,
            &["apprais", "county value"],
            &[],
        )
        .pattern(
            &format!(r"(?i)(?:apprais\w*|county value)[^\d$.]*\$?\s*{NUM}"),
            Capture::Number,
        )?,
        def(
            "asking-price-dollars",
            Field::Price,
            SUBJECT,
            &["price", "value", "$"],
            &[
                "apprais", "county value", "lp/acre", "sp/acr", "lp/sf", "sp/sf", "/acre", "/sq",
                "per acre", "per sq",
            ],
        )
        .pattern(&format!(r"\$\s*{NUM}"), Capture::Number)?,
        def(
            "asking-price",
            Field::Price,
            SUBJECT,
            &["price", "value"],
            &[
                "apprais", "county value", "lp/acre", "sp/acr", "lp/sf", "sp/sf", "/acre", "/sq",
                "per acre", "per sq",
            ],
        )
        .pattern(&format!(r"(?i)(?:price|value)\D*?{NUM}"), Capture::Number)?,
        // Comparable: MLS sold-listing labels.
        def("sale-price", Field::Price, COMPARABLE, &["sale price"], &[])
            .pattern(&format!(r"(?i)sale price:\s*\$?\s*{NUM}"), Capture::Number)?,
        def("sale-price-per-sqft", Field::PricePerSqFt, COMPARABLE, &["sp/sf"], &[])
            .pattern(&format!(r"(?i)sp/sf:\s*\$?\s*{NUM}"), Capture::Number)?,
        def("sale-price-per-acre", Field::PricePerAcre, COMPARABLE, &["sp/acr"], &[])
            .pattern(&format!(r"(?i)sp/acr\w*:\s*\$?\s*{NUM}"), Capture::Number)?,
        def("close-date", Field::CloseDate, COMPARABLE, &["close date"], &[]).pattern(
            r"(?i)close date:\s*(\d{1,2}/\d{1,2}/\d{4})",
            Capture::Date,
        )?,
        // Active listing: list price in descending order of specificity.
        def("list-price", Field::Price, ACTIVE, &["list price", "asking price"], &[])
            .pattern(
                &format!(r"(?i)(?:list|asking) price:?\s*\$?\s*{NUM}"),
                Capture::Number,
            )?,
        def("price-label", Field::Price, ACTIVE, &["price:"], PER_UNIT_LABELS)
            .pattern(&format!(r"(?i)\bprice:\s*\$?\s*{NUM}"), Capture::Number)?,
        def(
            "dollar-amount",
            Field::Price,
            ACTIVE,
            &["$"],
            &[
                "lp/acre", "sp/acr", "lp/sf", "sp/sf", "/acre", "/sq", "per acre", "per sq",
                "tax", "hoa", "fee", "apprais",
            ],
        )
        .pattern(r"\$(\d{1,3}(?:,\d{3})+(?:\.\d{2})?)", Capture::Number)?,
        def(
            "list-price-per-sqft",
            Field::PricePerSqFt,
            ACTIVE,
            &["lp/sf", "price/sq", "price per sq", "$/sq"],
            &[],
        )
        .pattern(
            &format!(r"(?i)(?:lp/sf|price/sq\.?\s*ft|price per sq\.?\s*ft|\$/sq\.?\s*ft):?\s*\$?\s*{NUM}"),
            Capture::Number,
        )?,
        def(
            "list-price-per-acre",
            Field::PricePerAcre,
            ACTIVE,
            &["lp/acre", "price/acre", "price per acre", "$/acre"],
            &[],
        )
        .pattern(
            &format!(r"(?i)(?:lp/acre|price/acre|price per acre|\$/acre):?\s*\$?\s*{NUM}"),
            Capture::Number,
        )?,
        def("dom", Field::DaysOnMarket, SOLD_OR_LISTED, &["dom"], &[])
            .pattern(r"(?i)\bdom:\s*(\d+)", Capture::Count)?,
        def(
            "days-on-market",
            Field::DaysOnMarket,
            ACTIVE,
            &["days on market", "days listed"],
            &[],
        )
        .pattern(r"(?i)(?:days on market|days listed)\D*(\d+)", Capture::Count)?,
        def("list-date", Field::ListDate, ACTIVE, &["list", "listed"], &[]).pattern(
            r"(?i)(?:list date|date listed|listed)\s*:?\s*(\d{1,2}/\d{1,2}/(?:\d{4}|\d{2}))\b",
            Capture::Date,
        )?,
        def("status", Field::Status, ACTIVE, &["status:"], &[])
            .pattern(r"(?i)^status:\s*([a-z][a-z -]*)", Capture::Text)?,
        // Site conditions, flags and flood zone apply to every role.
        def("debris", Field::Debris, ALL, &["debris", "trash"], &[]).with(Matcher::Qualifier),
        def("slope", Field::Slope, ALL, &["slope", "terrain"], &[]).with(Matcher::Qualifier),
        def("trees", Field::Trees, ALL, &["tree", "forest"], &[]).with(Matcher::Qualifier),
        def("well", Field::NeedsWell, ALL, &["well needed", "no water"], &[]).with(Matcher::Keywords),
        def("septic", Field::NeedsSeptic, ALL, &["septic", "sewage"], &[]).with(Matcher::Keywords),
        flood,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule<'a>(rules: &'a [Rule], name: &str) -> &'a Rule {
        rules.iter().find(|r| r.name == name).unwrap()
    }

    fn eval(rule: &Rule, line: &str) -> Option<Value> {
        rule.evaluate(line, &line.to_lowercase())
    }

    #[test]
    fn table_compiles_and_names_are_unique() {
        let rules = rule_table().unwrap();
        let mut names: Vec<_> = rules.iter().map(|r| r.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), rules.len());
    }

    #[test]
    fn only_flood_zone_is_last_match() {
        let rules = rule_table().unwrap();
        for r in &rules {
            let expected = if r.field == Field::FloodZone {
                Precedence::LastMatch
            } else {
                Precedence::FirstMatch
            };
            assert_eq!(r.precedence, expected, "rule {}", r.name);
        }
    }

    #[test]
    fn flood_zone_precedence_within_a_line() {
        assert_eq!(
            classify_flood_zone("coastal 100-year floodway"),
            FloodZone::CoastalHundredYearWay
        );
        assert_eq!(
            classify_flood_zone("coastal 100 flood plain"),
            FloodZone::CoastalHundredYear
        );
        assert_eq!(classify_flood_zone("flood: 500-year"), FloodZone::FiveHundredYear);
        assert_eq!(classify_flood_zone("100-year floodway"), FloodZone::HundredYearWay);
        assert_eq!(classify_flood_zone("flood zone: 100-year"), FloodZone::HundredYear);
        assert_eq!(classify_flood_zone("clear of flood zone"), FloodZone::Clear);
        assert_eq!(classify_flood_zone("flood: see survey"), FloodZone::Undetermined);
    }

    #[test]
    fn acres_label_reads_leading_decimal() {
        let rules = rule_table().unwrap();
        let r = rule(&rules, "acres-label");
        assert_eq!(eval(r, "Acres: .25"), Some(Value::Number(0.25)));
        assert_eq!(eval(r, "Acres: 1.9170"), Some(Value::Number(1.917)));
        assert_eq!(eval(r, "LP/Acre: $70,422.54"), None);
    }

    #[test]
    fn lot_size_in_acres_is_not_square_feet() {
        let rules = rule_table().unwrap();
        assert_eq!(eval(rule(&rules, "lot-size"), "Lot Size: 2.5 acres"), None);
        assert_eq!(
            eval(rule(&rules, "lot-size-acres"), "Lot Size: 2.5 acres"),
            Some(Value::Number(2.5))
        );
        assert_eq!(
            eval(rule(&rules, "lot-size"), "Lot Size: 83,505 / Appr Dist"),
            Some(Value::Number(83_505.0))
        );
    }

    #[test]
    fn dollar_amount_ignores_per_unit_lines() {
        let rules = rule_table().unwrap();
        let r = rule(&rules, "dollar-amount");
        assert_eq!(eval(r, "LP/SF: $1.62"), None);
        assert_eq!(eval(r, "LP/Acre: $70,422.54"), None);
        assert_eq!(eval(r, "Offered at $135,000"), Some(Value::Number(135_000.0)));
    }

    #[test]
    fn qualifiers_need_a_level_word() {
        let rules = rule_table().unwrap();
        let debris = rule(&rules, "debris");
        assert_eq!(eval(debris, "Heavy debris on site"), Some(Value::Debris(DebrisLevel::Heavy)));
        assert_eq!(eval(debris, "Some debris"), None);
        let slope = rule(&rules, "slope");
        assert_eq!(eval(slope, "Steep slope to creek"), Some(Value::Slope(Slope::Steep)));
    }
}
