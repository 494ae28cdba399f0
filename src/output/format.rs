//! Rendering aggregated blocks as text lines.

use crate::models::CidrBlock;
use crate::processing::CountryCidrSet;
use std::io::Write;

/// How each block is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `a.b.c.d/n`
    #[default]
    Cidr,
    /// `a.b.c.d m.m.m.m`
    SubnetMask,
}

impl OutputFormat {
    pub fn from_mask_flag(mask: bool) -> OutputFormat {
        if mask {
            OutputFormat::SubnetMask
        } else {
            OutputFormat::Cidr
        }
    }

    pub fn render_block(self, block: &CidrBlock) -> String {
        match self {
            OutputFormat::Cidr => block.to_string(),
            OutputFormat::SubnetMask => format!("{} {}", block.base(), block.netmask()),
        }
    }
}

/// `"CC\t<block>"` lines, countries ascending.
///
/// An empty `countries` slice selects every country; otherwise only the
/// listed codes (case-insensitive) are rendered.
pub fn render_lines(set: &CountryCidrSet, format: OutputFormat, countries: &[String]) -> Vec<String> {
    set.iter()
        .filter(|(cc, _)| countries.is_empty() || countries.iter().any(|c| c.eq_ignore_ascii_case(cc)))
        .flat_map(|(cc, blocks)| {
            blocks
                .iter()
                .map(move |block| format!("{cc}\t{}", format.render_block(block)))
        })
        .collect()
}

/// Write [`render_lines`] output, one line each.
pub fn write_country_set<W: Write>(
    out: &mut W,
    set: &CountryCidrSet,
    format: OutputFormat,
    countries: &[String],
) -> std::io::Result<()> {
    for line in render_lines(set, format, countries) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
