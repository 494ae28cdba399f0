//! Terminal output utilities.
//!
//! Provides the coloured run summary written to stderr, so stdout stays a
//! clean list of blocks.

use crate::processing::{total_addresses, CountryCidrSet};
use colored::Colorize;

/// Format a value as a right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    format!("{value_str:>width$}")
}

/// One summary row per country: code, block count, address count.
pub fn summary_rows(set: &CountryCidrSet) -> Vec<String> {
    set.iter()
        .map(|(cc, blocks)| {
            format!(
                "{cc}{blocks}{addresses}",
                cc = format_field(cc, 4),
                blocks = format_field(blocks.len(), 8),
                addresses = format_field(total_addresses(blocks), 14),
            )
        })
        .collect()
}

/// Print the summary table and totals to stderr.
pub fn print_summary(set: &CountryCidrSet) {
    eprintln!(
        "{}",
        format!("{:>4}{:>8}{:>14}", "cc", "blocks", "addresses").bold()
    );
    for row in summary_rows(set) {
        eprintln!("{row}");
    }
    let blocks: usize = set.values().map(Vec::len).sum();
    let addresses: u64 = set.values().map(|b| total_addresses(b)).sum();
    eprintln!(
        "#{}# {} countries, {} blocks, {} addresses",
        "DONE".on_green(),
        set.len(),
        blocks,
        addresses
    );
}
