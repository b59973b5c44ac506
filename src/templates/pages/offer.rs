// src/templates/pages/offer.rs

use crate::calculators::{CalcError, LandOffer, OfferInput, FACTOR_LIMIT};
use crate::templates::components::fields::{number_field, text_field};
use crate::templates::components::format::{input_value, money, percent, whole_money};
use crate::templates::components::{button, card, error_notice};
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Comparable rows shown on the offer form.
pub const OFFER_COMPARABLE_ROWS: usize = 5;

pub struct OfferVm {
    pub input: OfferInput,
    pub result: Option<Result<LandOffer, CalcError>>,
}

pub fn offer_page(vm: &OfferVm) -> Markup {
    let factors = [
        ("location", "Location", vm.input.adjustments.location),
        ("development", "Development", vm.input.adjustments.development),
        ("access", "Access", vm.input.adjustments.access),
        ("utilities", "Utilities", vm.input.adjustments.utilities),
    ];

    desktop_layout(
        "Land Offer",
        html! {
            main class="container" {
                h1 { "Land Offer Calculator" }

                form method="post" action="/offer" {
                    (card("Property", html! {
                        (number_field("acreage", "Acreage", &input_value(Some(vm.input.acreage).filter(|a| *a > 0.0))))
                    }))

                    (card("Comparable Sales", html! {
                        table {
                            thead { tr { th { "Address" } th { "Acreage" } th { "Sale Price" } th { "Price / Acre" } } }
                            tbody {
                                @for i in 0..OFFER_COMPARABLE_ROWS {
                                    @let comp = vm.input.comparables.get(i);
                                    tr {
                                        td { (text_field(&format!("comp{}_address", i + 1), "", comp.map(|c| c.address.as_str()).unwrap_or_default())) }
                                        td { (number_field(&format!("comp{}_acreage", i + 1), "", &input_value(comp.map(|c| c.acreage).filter(|v| *v > 0.0)))) }
                                        td { (number_field(&format!("comp{}_sale_price", i + 1), "", &input_value(comp.map(|c| c.sale_price).filter(|v| *v > 0.0)))) }
                                        td { (comp.and_then(|c| c.price_per_acre()).map(money).unwrap_or_default()) }
                                    }
                                }
                            }
                        }
                    }))

                    (card("Adjustment Factors", html! {
                        p class="muted" { "Each factor is a percentage between -" (FACTOR_LIMIT) " and " (FACTOR_LIMIT) "." }
                        div class="fields" {
                            @for (name, label, value) in factors {
                                label class="field" {
                                    span { (label) " (%)" }
                                    input type="number" name=(name) min=(-FACTOR_LIMIT) max=(FACTOR_LIMIT) step="1" value=(value);
                                }
                            }
                        }
                    }))

                    (button("Calculate Offer", false))
                }

                @match &vm.result {
                    Some(Ok(offer)) => {
                        (card("Offer", html! {
                            table {
                                tbody {
                                    tr { th { "Average Price / Acre" } td { (money(offer.avg_price_per_acre)) } }
                                    tr { th { "Base Price" } td { (whole_money(offer.base_price)) } }
                                    tr { th { "Total Adjustment" } td { (percent(offer.total_adjustment)) } }
                                    tr { th { "Final Offer" } td { strong { (whole_money(offer.final_offer)) } } }
                                }
                            }
                        }))
                    }
                    Some(Err(CalcError::InsufficientData)) => {
                        (error_notice("Add at least one comparable with acreage and a sale price."))
                    }
                    Some(Err(err)) => (error_notice(&err.to_string())),
                    None => {}
                }
            }
        },
    )
}
