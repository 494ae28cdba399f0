//! Registry delegation files.
//!
//! This module handles getting allocation records in:
//! - [`parse`] - Delegation line format
//! - [`cache`] - HTTP download with a disk cache
//! - [`sources`] - Reading and combining all configured sources

mod cache;
mod parse;
mod sources;

// Re-export public types and functions
pub use cache::{
    cache_entry_path, cache_is_valid, cache_key, cache_path, load_cache_entry, open_url,
    parse_cache_headers, save_cache_entry, CacheEntry,
};
pub use parse::{parse_delegated, parse_line};
pub use sources::{load_records, read_source, Source};
