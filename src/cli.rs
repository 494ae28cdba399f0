//! Command-line arguments.

use crate::config;
use crate::delegated::Source;
use crate::processing::OverlapPolicy;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rir-cidr-summary")]
#[command(about = "Aggregate RIR delegation files into minimal per-country CIDR blocks.")]
pub struct CommandLine {
    /// Print dotted subnet masks instead of prefix lengths
    #[arg(short, long)]
    pub mask: bool,

    /// Directory for cached downloads
    #[arg(long, env = "RIR_CACHE_DIR", default_value = config::CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Delegation file URL, repeatable (default: all five RIRs)
    #[arg(long = "source", value_name = "URL")]
    pub sources: Vec<String>,

    /// Local delegation file, repeatable
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Only print these country codes, repeatable
    #[arg(short, long = "country", value_name = "CC")]
    pub countries: Vec<String>,

    /// How to treat allocations that overlap
    #[arg(long, value_enum, default_value = "union")]
    pub overlap: OverlapPolicy,

    /// Print a per-country summary to stderr
    #[arg(long)]
    pub summary: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Sources to read. Falls back to the RIR URLs when neither `--source`
    /// nor `--file` is given.
    pub fn sources(&self) -> Vec<Source> {
        if self.sources.is_empty() && self.files.is_empty() {
            return config::RIR_URLS
                .iter()
                .map(|url| Source::Url(url.to_string()))
                .collect();
        }
        self.sources
            .iter()
            .cloned()
            .map(Source::Url)
            .chain(self.files.iter().cloned().map(Source::File))
            .collect()
    }
}
