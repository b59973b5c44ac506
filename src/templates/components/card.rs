// src/templates/components/card.rs
use maud::{html, Markup};

/// Titled section. The title doubles as the section's anchor, so
/// "Comparable Sales" can be linked as `#comparable-sales`.
pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" id=(anchor(title)) {
            h2 { a href=(format!("#{}", anchor(title))) { (title) } }
            (body)
        }
    }
}

pub fn anchor(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
