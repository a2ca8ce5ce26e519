//! skillcheck-report — rendering of score reports.
//!
//! Turns a `ScoreReport` into Markdown or a self-contained HTML page for
//! dashboards and result emails. Rendering only; the numbers come from
//! `skillcheck-core`.

pub mod html;
pub mod markdown;

pub use html::{generate_html, write_html_report};
pub use markdown::render_markdown;
