// src/templates/pages/calculator.rs

use crate::domain::{
    DebrisLevel, FloodZone, PropertyRecord, Session, Slope, SlotId, SlotRole, Trees,
};
use crate::templates::components::fields::{date_field, number_field, select_field, text_field};
use crate::templates::components::format::{input_value, money, or_dash, percent, whole_money};
use crate::templates::components::card::anchor;
use crate::templates::components::{button, card, error_notice};
use crate::templates::desktop_layout;
use crate::valuation::{
    can_evaluate, ActiveListingAnalysis, AskingComparison, Average, ComparableSummary,
    MarketEstimate, SubjectValuation, ValuationError, ValuationResult,
};
use maud::{html, Markup};

pub const PARSE_FAILURE_MESSAGE: &str =
    "Could not parse the input data. Please check the format and try again.";

/// A message pinned to one slot's card.
pub struct SlotNotice {
    pub slot: SlotId,
    pub message: String,
}

pub struct CalculatorVm {
    pub session: Session,
    pub result: ValuationResult,
    pub notice: Option<SlotNotice>,
}

pub fn calculator_page(vm: &CalculatorVm) -> Markup {
    desktop_layout(
        "Calculator",
        html! {
            main class="container" {
                h1 { "Land Evaluation Calculator" }
                p class="muted" {
                    "Paste an MLS sheet or your own notes into a slot, then correct any field by hand."
                }

                div class="slots" {
                    @for slot in SlotId::ALL {
                        (slot_card(slot, vm.session.slot(slot), notice_for(vm, slot)))
                    }
                }

                (subject_card(&vm.session.subject, &vm.result.subject))
                (comparables_card(&vm.result.comparables))
                (market_card(&vm.result.market))
                (active_card(&vm.result.active_listing))
            }
        },
    )
}

fn notice_for(vm: &CalculatorVm, slot: SlotId) -> Option<&str> {
    vm.notice
        .as_ref()
        .filter(|n| n.slot == slot)
        .map(|n| n.message.as_str())
}

fn price_label(role: SlotRole) -> &'static str {
    match role {
        SlotRole::Subject => "Asking Price",
        SlotRole::Comparable => "Sale Price",
        SlotRole::ActiveListing => "List Price",
    }
}

fn slot_card(slot: SlotId, record: &PropertyRecord, notice: Option<&str>) -> Markup {
    let key = slot.key();
    let role = slot.role();
    let label = slot.label();
    // land back on this slot after the POST
    let here = anchor(label);

    card(
        label,
        html! {
            form method="post" action=(format!("/slots/{key}/paste#{here}")) {
                textarea name="text" placeholder="Paste listing text here" {}
                (button("Parse listing", false))
            }
            @if let Some(message) = notice {
                (error_notice(message))
            }

            form method="post" action=(format!("/slots/{key}#{here}")) {
                (text_field("address", "Address", record.address.as_deref().unwrap_or_default()))
                div class="fields" {
                    (number_field("acres", "Acres", &input_value(record.acres())))
                    (number_field("square_feet", "Square Feet", &input_value(record.square_feet())))
                    (number_field("price", price_label(role), &input_value(record.price())))
                    (number_field("price_per_acre", "Price / Acre", &input_value(record.price_per_acre())))
                    (number_field("price_per_sqft", "Price / Sq Ft", &input_value(record.price_per_sqft())))
                    @match role {
                        SlotRole::Subject => {
                            (number_field("appraisal_value", "Appraisal Value", &input_value(record.appraisal_value)))
                        }
                        SlotRole::Comparable => {
                            (date_field("close_date", "Close Date", &date_value(record.close_date)))
                            (number_field("days_on_market", "Days on Market", &count_value(record.days_on_market)))
                        }
                        SlotRole::ActiveListing => {
                            (date_field("list_date", "List Date", &date_value(record.list_date)))
                            (number_field("days_on_market", "Days on Market", &count_value(record.days_on_market)))
                            (text_field("status", "Status", record.status.as_deref().unwrap_or_default()))
                        }
                    }
                    (select_field("debris_level", "Debris", &DEBRIS_OPTIONS, record.debris_level.map(DebrisLevel::code).unwrap_or_default()))
                    (select_field("slope", "Slope", &SLOPE_OPTIONS, record.slope.map(Slope::code).unwrap_or_default()))
                    (select_field("trees", "Trees", &TREE_OPTIONS, record.trees.map(Trees::code).unwrap_or_default()))
                    (select_field("flood_zone", "Flood Zone", &flood_options(), record.flood_zone.map(FloodZone::code).unwrap_or_default()))
                    (select_field("needs_well", "Needs Well", &FLAG_OPTIONS, flag_value(record.needs_well)))
                    (select_field("needs_septic", "Needs Septic", &FLAG_OPTIONS, flag_value(record.needs_septic)))
                }
                (button("Save", false))
            }

            form method="post" action=(format!("/slots/{key}/clear#{here}")) {
                button class="btn secondary" type="submit" disabled[record.is_blank()] { "Clear" }
            }
        },
    )
}

const DEBRIS_OPTIONS: [(&str, &str); 3] = [("none", "None"), ("moderate", "Moderate"), ("heavy", "Heavy")];
const SLOPE_OPTIONS: [(&str, &str); 3] = [("none", "None"), ("moderate", "Moderate"), ("steep", "Steep")];
const TREE_OPTIONS: [(&str, &str); 3] = [("none", "None"), ("moderate", "Moderate"), ("heavy", "Heavy")];
const FLAG_OPTIONS: [(&str, &str); 2] = [("yes", "Yes"), ("no", "No")];

fn flood_options() -> Vec<(&'static str, &'static str)> {
    FloodZone::ALL.iter().map(|z| (z.code(), z.label())).collect()
}

fn flag_value(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "yes",
        Some(false) => "no",
        None => "",
    }
}

fn date_value(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn count_value(n: Option<u32>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

fn missing_input_text(err: &ValuationError) -> &'static str {
    match err {
        ValuationError::MissingAcreage => "Enter the acreage to evaluate this property.",
        ValuationError::MissingPrice => "Enter a price to evaluate this property.",
        ValuationError::TooManyComparables { .. } => "At most three comparables can be used.",
        ValuationError::InsufficientData => "Not enough data.",
    }
}

fn subject_card(subject: &PropertyRecord, valuation: &Result<SubjectValuation, ValuationError>) -> Markup {
    card(
        "Subject Valuation",
        html! {
            form method="get" action="/" {
                (button("Recalculate", !can_evaluate(subject)))
            }
            @match valuation {
                Ok(v) => {
                    table {
                        tbody {
                            tr { th { "Total Acres" } td { (format!("{:.4}", v.total_acres)) } }
                            tr { th { "Base Value" } td { (money(v.base_value)) } }
                            tr { th { "Flood Zone Multiplier" } td { (format!("{:.2}", v.flood_multiplier)) } }
                            tr { th { "Adjusted Value" } td { (money(v.adjusted_value)) } }
                            @for line in &v.site_prep {
                                tr { td { (line.label) } td { "−" (money(line.cost)) } }
                            }
                            tr { th { "Site Prep Cost" } td { (money(v.site_prep_cost)) } }
                            tr { th { "Final Value" } td { strong { (money(v.final_value)) } } }
                            tr { th { "Value per Acre" } td { (money(v.value_per_acre)) } }
                            tr {
                                th { "Total Impact" }
                                td { (money(v.total_impact)) " (" (percent(v.impact_percentage)) ")" }
                            }
                        }
                    }
                }
                Err(err) => p class="muted" { (missing_input_text(err)) },
            }
        },
    )
}

fn average_cell(avg: Average, show: fn(f64) -> String) -> Markup {
    html! {
        @match avg {
            Average::Value(v) => td { (show(v)) },
            Average::InsufficientData => td class="muted" { "Not enough data" },
        }
    }
}

fn comparables_card(summary: &Result<ComparableSummary, ValuationError>) -> Markup {
    card(
        "Comparable Sales",
        html! {
            @match summary {
                Ok(s) => {
                    table {
                        thead {
                            tr {
                                th { "" } th { "Address" } th { "Sale Price" } th { "Sq Ft" }
                                th { "Price / Sq Ft" } th { "Acres" } th { "Price / Acre" }
                                th { "DOM" } th { "Close Date" }
                            }
                        }
                        tbody {
                            @for (i, row) in s.rows.iter().enumerate() {
                                tr {
                                    td { "Comp " (i + 1) }
                                    td { (or_dash(row.address.clone())) }
                                    td { (or_dash(row.price.map(whole_money))) }
                                    td { (or_dash(row.square_feet.map(|v| format!("{v:.0}")))) }
                                    td { (or_dash(row.price_per_sqft.map(money))) }
                                    td { (or_dash(row.acres.map(|v| format!("{v:.4}")))) }
                                    td { (or_dash(row.price_per_acre.map(money))) }
                                    td { (or_dash(row.days_on_market.map(|d| d.to_string()))) }
                                    td { (or_dash(row.close_date.map(|d| d.format("%Y-%m-%d").to_string()))) }
                                }
                            }
                            tr {
                                th { "Average" }
                                td { "" }
                                (average_cell(s.averages.price, whole_money))
                                (average_cell(s.averages.square_feet, |v| format!("{v:.0}")))
                                (average_cell(s.averages.price_per_sqft, money))
                                (average_cell(s.averages.acres, |v| format!("{v:.4}")))
                                (average_cell(s.averages.price_per_acre, money))
                                (average_cell(s.averages.days_on_market, |v| format!("{v:.0}")))
                                td { "" }
                            }
                        }
                    }
                }
                Err(err) => p class="muted" { (missing_input_text(err)) },
            }
        },
    )
}

fn market_card(estimate: &Result<MarketEstimate, ValuationError>) -> Markup {
    card(
        "Market Value Estimate",
        html! {
            @match estimate {
                Ok(m) => {
                    p { "Average Price per Square Foot: " (money(m.avg_price_per_sqft)) }
                    p {
                        "Subject Property Size: " (format!("{:.0}", m.subject_square_feet)) " sq ft"
                        @if let Some(acres) = m.subject_acres {
                            " (" (format!("{acres:.4}")) " acres)"
                        }
                    }
                    div class="highlight" {
                        h3 { "Estimated Market Value: " (whole_money(m.estimated_value)) }
                        @match m.asking_comparison {
                            Some(AskingComparison::Above(pct)) => p { "This is " (format!("{pct:.1}")) "% above the asking price" },
                            Some(AskingComparison::Below(pct)) => p { "This is " (format!("{pct:.1}")) "% below the asking price" },
                            None => {},
                        }
                    }
                    table {
                        thead {
                            tr { th { "Percentage" } th { "Value" } th { "Per Sq Ft" } th { "Per Acre" } }
                        }
                        tbody {
                            @for row in &m.breakdown {
                                tr {
                                    td { (row.percentage) "%" }
                                    td { (whole_money(row.value)) }
                                    td { (money(row.per_sqft)) }
                                    td { (or_dash(row.per_acre.map(money))) }
                                }
                            }
                        }
                    }
                }
                Err(_) => p class="muted" {
                    "Not enough data. The estimate needs comparables with a price per square foot and the subject's square footage."
                },
            }
        },
    )
}

fn active_card(analysis: &Result<ActiveListingAnalysis, ValuationError>) -> Markup {
    card(
        "Active Listing Analysis",
        html! {
            @match analysis {
                Ok(a) => {
                    table {
                        tbody {
                            tr { th { "List Price" } td { (whole_money(a.list_price)) } }
                            tr { th { "Acres" } td { (format!("{:.4}", a.acres)) } }
                            tr { th { "Price / Acre" } td { (money(a.price_per_acre)) } }
                            tr { th { "Price / Sq Ft" } td { (or_dash(a.price_per_sqft.map(money))) } }
                            tr { th { "Days on Market" } td { (or_dash(a.days_on_market.map(|d| d.to_string()))) } }
                            tr { th { "List Date" } td { (or_dash(a.list_date.map(|d| d.format("%Y-%m-%d").to_string()))) } }
                            tr { th { "Status" } td { (or_dash(a.status.clone())) } }
                        }
                    }
                }
                Err(err) => p class="muted" { (missing_input_text(err)) },
            }
        },
    )
}
