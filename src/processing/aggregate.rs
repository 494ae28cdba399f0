//! Per-country aggregation.
//!
//! Split every record, merge each country's blocks into maximal runs, then
//! split those runs again. The second split is what makes the result minimal
//! when the registry lists neighbouring allocations as separate records.

use super::merge::{merge_with_policy, OverlapPolicy};
use super::split::{split, split_range};
use crate::error::Result;
use crate::models::{AllocationRecord, CidrBlock};
use std::collections::BTreeMap;

/// Country code -> minimal ascending CIDR blocks. Keys iterate in ascending
/// lexical order.
pub type CountryCidrSet = BTreeMap<String, Vec<CidrBlock>>;

/// Aggregate allocation records into a [`CountryCidrSet`].
///
/// Records that cannot be split, and countries whose blocks fail the overlap
/// policy, are logged and left out; the rest are still aggregated.
pub fn aggregate<I>(records: I, policy: OverlapPolicy) -> CountryCidrSet
where
    I: IntoIterator<Item = AllocationRecord>,
{
    let mut raw: BTreeMap<String, Vec<CidrBlock>> = BTreeMap::new();
    let mut record_count = 0;
    let mut skipped = 0;

    for record in records {
        record_count += 1;
        match split(record.start, record.host_count) {
            Ok(blocks) if blocks.is_empty() => {}
            Ok(blocks) => raw.entry(record.country_code).or_default().extend(blocks),
            Err(e) => {
                log::warn!(
                    "skipping {registry} record {cc} {start}: {e}",
                    registry = record.registry,
                    cc = record.country_code,
                    start = record.start,
                );
                skipped += 1;
            }
        }
    }
    log::info!(
        "split {record_count} records into {} countries, skipped {skipped}",
        raw.len()
    );

    raw.into_iter()
        .filter_map(|(cc, blocks)| match aggregate_country(&blocks, policy) {
            Ok(minimal) => {
                log::debug!("{cc}: {} raw blocks -> {}", blocks.len(), minimal.len());
                Some((cc, minimal))
            }
            Err(e) => {
                log::warn!("skipping country {cc}: {e}");
                None
            }
        })
        .collect()
}

/// Merge one country's blocks and split the merged runs again.
pub fn aggregate_country(blocks: &[CidrBlock], policy: OverlapPolicy) -> Result<Vec<CidrBlock>> {
    let ranges = merge_with_policy(blocks, policy)?;
    let mut minimal = Vec::with_capacity(ranges.len());
    for range in &ranges {
        minimal.extend(split_range(range)?);
    }
    Ok(minimal)
}

/// Number of addresses covered by disjoint `blocks`.
pub fn total_addresses(blocks: &[CidrBlock]) -> u64 {
    blocks.iter().map(CidrBlock::size).sum()
}
