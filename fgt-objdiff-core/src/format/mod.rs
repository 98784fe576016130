//! Report formatters.

pub mod json;
pub mod text;

pub use json::format_json;
pub use text::{format_cell, format_summary, format_text, NO_VALUE, OBJECT_MISSING};
