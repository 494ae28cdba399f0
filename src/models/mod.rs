//! Domain models for registry address aggregation.
//!
//! This module contains the core data structures used throughout the application:
//! - [`CidrBlock`] - network-aligned IPv4 prefix, plus the address codec
//! - [`AddressRange`] - arbitrary contiguous address run
//! - [`AllocationRecord`] - one parsed delegation line

mod ipv4;
mod range;
mod record;

// Re-export public types
pub use ipv4::{format_addr, get_cidr_mask, offset, parse_addr, CidrBlock, MAX_LENGTH};
pub use range::AddressRange;
pub use record::AllocationRecord;
