//! Formatting helpers shared by the console pages.

pub mod format;

pub use format::{format_date, format_score, truncate_string};
