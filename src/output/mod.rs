//! Output formatting for aggregated blocks.
//!
//! This module handles rendering the results:
//! - [`format`] - CIDR or subnet-mask lines on stdout
//! - [`terminal`] - Coloured summary on stderr

mod format;
mod terminal;

pub use format::{render_lines, write_country_set, OutputFormat};
pub use terminal::{format_field, print_summary, summary_rows};
