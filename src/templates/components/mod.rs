// src/templates/components/mod.rs
use maud::{html, Markup};

pub mod card;
pub mod error;
pub mod fields;
pub mod format;

pub use card::card;
pub use error::{error_notice, error_page};

pub fn button(label: &str, disabled: bool) -> Markup {
    html! {
        button class="btn" type="submit" disabled[disabled] { (label) }
    }
}
