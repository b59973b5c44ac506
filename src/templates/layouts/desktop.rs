// src/templates/layouts/desktop.rs
use maud::{html, Markup, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; background: #f9fafb; }
header { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
.container { max-width: 1200px; margin: 0 auto; padding: 1.5rem; }
.card { background: #fff; border-radius: 8px; padding: 1rem 1.5rem; margin-bottom: 1.5rem; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
.card h2 a { color: inherit; text-decoration: none; }
.slots { display: grid; grid-template-columns: repeat(auto-fit, minmax(340px, 1fr)); gap: 1rem; }
.field { display: flex; flex-direction: column; font-size: .9rem; margin-bottom: .5rem; }
.fields { display: grid; grid-template-columns: 1fr 1fr; gap: 0 1rem; }
textarea { width: 100%; min-height: 7rem; font-family: monospace; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 6px 8px; border-bottom: 1px solid #e5e7eb; text-align: left; }
.btn { padding: 6px 14px; background: #524ed2; color: #fff; border: none; border-radius: 4px; cursor: pointer; }
.btn[disabled] { background: #9ca3af; cursor: not-allowed; }
.notice.error { color: #dc2626; font-weight: bold; }
.muted { color: #6b7280; font-style: italic; }
.highlight { background: #524ed2; color: #fff; padding: 1rem; border-radius: 6px; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Land Calculator" }
                style { (maud::PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "Land Evaluation Calculator" }
                    nav {
                        ul {
                            li { a href="/" { "Calculator" } }
                            li { a href="/offer" { "Land Offer" } }
                            li { a href="/amortization" { "Amortization" } }
                            li { a href="/report.xlsx" { "Export XLSX" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
