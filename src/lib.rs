// cargo watch -x 'fmt' -x 'run'  // 'run -- --file delegated.txt'

pub mod cli;
pub mod config;
pub mod delegated;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use delegated::{load_records, Source};
use error::Result;
use processing::{aggregate, CountryCidrSet, OverlapPolicy};
use std::path::Path;

pub use error::Error;

/// Read every source and aggregate all of their records per country.
pub async fn summarize(
    sources: &[Source],
    cache_dir: &Path,
    policy: OverlapPolicy,
) -> Result<CountryCidrSet> {
    let records = load_records(sources, cache_dir).await?;
    let set = aggregate(records, policy);
    log::info!("aggregated {} countries", set.len());
    Ok(set)
}
