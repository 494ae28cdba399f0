//! Merging CIDR blocks into maximal contiguous runs.

use crate::error::{Error, Result};
use crate::models::{AddressRange, CidrBlock};
use itertools::Itertools;
use std::str::FromStr;

/// How [`merge_with_policy`] treats blocks that share addresses.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Input is taken to be disjoint; overlaps are not looked for and only
    /// exact adjacency is coalesced.
    Assume,
    /// Fail on the first pair of overlapping blocks.
    Reject,
    /// Coalesce overlapping blocks into the union of their addresses.
    #[default]
    Union,
}

/// Merge blocks into sorted, maximal runs.
///
/// Input order does not matter. Runs are coalesced only when one starts at
/// exactly the address after the other ends; the input is assumed disjoint.
///
/// # Examples
/// ```
/// use rir_cidr_summary::models::CidrBlock;
/// use rir_cidr_summary::processing::merge;
/// let blocks: Vec<CidrBlock> = ["192.168.1.0/24", "192.168.0.0/24"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let ranges = merge(&blocks);
/// assert_eq!(ranges.len(), 1);
/// assert_eq!(ranges[0].count, 512);
/// ```
pub fn merge(blocks: &[CidrBlock]) -> Vec<AddressRange> {
    coalesce_adjacent(sorted_ranges(blocks))
}

/// Decode `"a.b.c.d/n"` strings and [`merge`] them.
///
/// # Returns
/// * `Err(Error::CidrFormat)` - if any string is not a valid, aligned block
pub fn merge_cidr_strs(cidrs: &[&str]) -> Result<Vec<AddressRange>> {
    let blocks = cidrs
        .iter()
        .map(|s| CidrBlock::from_str(s))
        .collect::<Result<Vec<_>>>()?;
    Ok(merge(&blocks))
}

/// [`merge`] with an explicit policy for overlapping input.
pub fn merge_with_policy(blocks: &[CidrBlock], policy: OverlapPolicy) -> Result<Vec<AddressRange>> {
    match policy {
        OverlapPolicy::Assume => Ok(merge(blocks)),
        OverlapPolicy::Reject => {
            let ranges = sorted_ranges(blocks);
            // sorted by start, so any overlap shows up between neighbours
            if let Some(pair) = ranges.windows(2).find(|w| overlaps(&w[0], &w[1])) {
                return Err(Error::OverlappingBlocks {
                    first: pair[0].to_string(),
                    second: pair[1].to_string(),
                });
            }
            Ok(coalesce_adjacent(ranges))
        }
        OverlapPolicy::Union => Ok(coalesce_union(sorted_ranges(blocks))),
    }
}

fn sorted_ranges(blocks: &[CidrBlock]) -> Vec<AddressRange> {
    let mut ranges: Vec<AddressRange> = blocks.iter().copied().map(AddressRange::from).collect();
    ranges.sort_unstable();
    ranges
}

fn coalesce_adjacent(ranges: Vec<AddressRange>) -> Vec<AddressRange> {
    ranges
        .into_iter()
        .coalesce(|run, next| {
            if run.is_adjacent_to(&next) {
                Ok(AddressRange::new(run.start, run.count + next.count))
            } else {
                Err((run, next))
            }
        })
        .collect()
}

fn coalesce_union(ranges: Vec<AddressRange>) -> Vec<AddressRange> {
    ranges
        .into_iter()
        .coalesce(|run, next| {
            let next_start = u64::from(u32::from(next.start));
            if next_start > run.end() {
                return Err((run, next));
            }
            if next_start < run.end() {
                log::warn!("overlapping ranges {run} and {next}, keeping their union");
            }
            let end = run.end().max(next.end());
            Ok(AddressRange::new(
                run.start,
                end - u64::from(u32::from(run.start)),
            ))
        })
        .collect()
}

fn overlaps(a: &AddressRange, b: &AddressRange) -> bool {
    a.end() > u64::from(u32::from(b.start))
}
