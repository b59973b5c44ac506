// src/templates/components/error.rs
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Full error page for a failed request.
pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        html! {
            main class="container" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to the calculator" } }
            }
        },
    )
}

/// Inline notice shown next to a form that could not be applied.
pub fn error_notice(message: &str) -> Markup {
    html! {
        p class="notice error" role="alert" { (message) }
    }
}
