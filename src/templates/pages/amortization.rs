// src/templates/pages/amortization.rs

use crate::calculators::{AmortizationSchedule, CalcError, LoanTerms};
use crate::templates::components::fields::number_field;
use crate::templates::components::format::{input_value, money};
use crate::templates::components::{button, card, error_notice};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct AmortizationVm {
    pub terms: LoanTerms,
    pub result: Option<Result<AmortizationSchedule, CalcError>>,
}

pub fn amortization_page(vm: &AmortizationVm) -> Markup {
    let years = (vm.terms.years > 0).then(|| f64::from(vm.terms.years));

    desktop_layout(
        "Amortization",
        html! {
            main class="container" {
                h1 { "Amortization Calculator" }

                (card("Loan", html! {
                    form method="post" action="/amortization" {
                        div class="fields" {
                            (number_field("principal", "Loan Amount", &input_value(Some(vm.terms.principal).filter(|p| *p > 0.0))))
                            (number_field("annual_rate", "Interest Rate (%)", &input_value(Some(vm.terms.annual_rate))))
                            (number_field("years", "Term (years)", &input_value(years)))
                        }
                        (button("Calculate", false))
                    }
                }))

                @match &vm.result {
                    Some(Ok(schedule)) => {
                        (card("Summary", html! {
                            p { "Monthly Payment: " strong { (money(schedule.monthly_payment)) } }
                            p { "Total Interest: " (money(schedule.total_interest)) }
                            p { "Total Paid: " (money(schedule.total_paid)) }
                        }))
                        (card("Schedule", html! {
                            table {
                                thead {
                                    tr { th { "#" } th { "Payment" } th { "Principal" } th { "Interest" } th { "Balance" } }
                                }
                                tbody {
                                    @for row in &schedule.rows {
                                        tr {
                                            td { (row.number) }
                                            td { (money(row.payment)) }
                                            td { (money(row.principal)) }
                                            td { (money(row.interest)) }
                                            td { (money(row.remaining_balance)) }
                                        }
                                    }
                                }
                            }
                        }))
                    }
                    Some(Err(err)) => (error_notice(&err.to_string())),
                    None => {}
                }
            }
        },
    )
}
