//! Reading every configured delegation source.

use super::cache::open_url;
use super::parse::parse_delegated;
use crate::error::{Error, Result};
use crate::models::AllocationRecord;
use futures::future::join_all;
use std::path::{Path, PathBuf};

/// Where a delegation file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Downloaded through the disk cache.
    Url(String),
    /// Read directly from a local file.
    File(PathBuf),
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the text of one source.
pub async fn read_source(source: &Source, cache_dir: &Path) -> Result<String> {
    match source {
        Source::Url(url) => open_url(url, cache_dir).await,
        Source::File(path) => {
            log::info!("Reading delegation file: {}", path.display());
            Ok(std::fs::read_to_string(path)?)
        }
    }
}

/// Read all sources concurrently and parse them into one record list.
///
/// A source that cannot be read is logged and skipped; every readable
/// source contributes its records.
///
/// # Returns
/// * `Err(Error::NoSources)` - if no source could be read
pub async fn load_records(sources: &[Source], cache_dir: &Path) -> Result<Vec<AllocationRecord>> {
    let texts = join_all(sources.iter().map(|s| read_source(s, cache_dir))).await;

    let mut records = Vec::new();
    let mut read_ok = 0;
    for (source, text) in sources.iter().zip(texts) {
        match text {
            Ok(text) => {
                let parsed = parse_delegated(&text);
                log::info!("{source}: {} IPv4 records", parsed.len());
                records.extend(parsed);
                read_ok += 1;
            }
            Err(e) => log::warn!("skipping source {source}: {e}"),
        }
    }

    if read_ok == 0 {
        return Err(Error::NoSources);
    }
    log::info!(
        "read {read_ok}/{} sources, {} records",
        sources.len(),
        records.len()
    );
    Ok(records)
}
