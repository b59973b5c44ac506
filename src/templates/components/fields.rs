// src/templates/components/fields.rs
use maud::{html, Markup};

pub fn number_field(name: &str, label: &str, value: &str) -> Markup {
    html! {
        label class="field" {
            span { (label) }
            input type="text" inputmode="decimal" name=(name) value=(value);
        }
    }
}

pub fn text_field(name: &str, label: &str, value: &str) -> Markup {
    html! {
        label class="field" {
            span { (label) }
            input type="text" name=(name) value=(value);
        }
    }
}

pub fn date_field(name: &str, label: &str, value: &str) -> Markup {
    html! {
        label class="field" {
            span { (label) }
            input type="date" name=(name) value=(value);
        }
    }
}

/// A select with an empty "not set" option first. `options` are
/// `(code, label)` pairs.
pub fn select_field(name: &str, label: &str, options: &[(&str, &str)], selected: &str) -> Markup {
    html! {
        label class="field" {
            span { (label) }
            select name=(name) {
                option value="" selected[selected.is_empty()] { "—" }
                @for (code, text) in options {
                    option value=(code) selected[*code == selected] { (text) }
                }
            }
        }
    }
}
