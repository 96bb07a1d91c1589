//! Presentation: the engine's frames turned into something to look at.

pub mod html;
pub mod text;

pub use html::render_html_report;
pub use text::{TextOptions, render_text_table};
