//! Allocation record read from a registry delegation file.

use serde::Serialize;
use std::net::Ipv4Addr;

/// One IPv4 allocation: `host_count` addresses from `start`, held by
/// `country_code`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AllocationRecord {
    /// Registry that published the record (first column, e.g. `apnic`).
    pub registry: String,
    /// ISO 3166 two-letter code as written in the file.
    pub country_code: String,
    pub start: Ipv4Addr,
    /// Number of addresses. Signed because the file may contain anything;
    /// the splitter rejects negative values.
    pub host_count: i64,
}

impl AllocationRecord {
    pub fn new(registry: &str, country_code: &str, start: Ipv4Addr, host_count: i64) -> Self {
        AllocationRecord {
            registry: registry.to_string(),
            country_code: country_code.to_string(),
            start,
            host_count,
        }
    }
}
