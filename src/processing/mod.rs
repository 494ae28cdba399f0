//! Address range algebra.
//!
//! This module contains the aggregation logic:
//! - [`split`] - (start, count) to minimal aligned CIDR blocks
//! - [`merge`] - CIDR blocks to maximal contiguous runs
//! - [`aggregate`] - per-country split, merge, re-split pipeline

mod aggregate;
mod merge;
mod split;

// Re-export public functions
pub use aggregate::{aggregate, aggregate_country, total_addresses, CountryCidrSet};
pub use merge::{merge, merge_cidr_strs, merge_with_policy, OverlapPolicy};
pub use split::{split, split_range};
