//! Error types for address parsing, range algebra and source retrieval.

use std::net::Ipv4Addr;
use thiserror::Error;

/// Errors produced by the crate.
///
/// The first group belongs to the address algebra and is always local to one
/// input line or record; callers log it and move on. The second group comes
/// from fetching and caching the registry files.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid IPv4 address: '{0}'")]
    AddressFormat(String),

    #[error("address {addr} + {offset} exceeds 255.255.255.255")]
    AddressRangeOverflow { addr: Ipv4Addr, offset: u64 },

    #[error("invalid host count {count} from {start}")]
    InvalidHostCount { start: Ipv4Addr, count: i64 },

    #[error("invalid CIDR block: '{0}'")]
    CidrFormat(String),

    #[error("malformed delegation line: {0}")]
    LineFormat(String),

    #[error("overlapping blocks: {first} and {second}")]
    OverlappingBlocks { first: String, second: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache entry error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no allocation source could be read")]
    NoSources,
}

pub type Result<T> = std::result::Result<T, Error>;
