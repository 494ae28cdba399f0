//! Contiguous address runs.

use super::ipv4::CidrBlock;
use serde::Serialize;
use std::net::Ipv4Addr;

/// A contiguous run of `count` addresses starting at `start`.
///
/// Unlike a [`CidrBlock`] the run need not be aligned or a power of two.
#[derive(Serialize, Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct AddressRange {
    pub start: Ipv4Addr,
    pub count: u64,
}

impl AddressRange {
    /// A run is never empty: `count` must be at least 1.
    pub fn new(start: Ipv4Addr, count: u64) -> AddressRange {
        debug_assert!(count > 0, "empty address range at {start}");
        AddressRange { start, count }
    }

    /// One past the last address, as a 33-bit value so the top of the space
    /// does not wrap.
    pub fn end(&self) -> u64 {
        u64::from(u32::from(self.start)) + self.count
    }

    /// True when `next` starts exactly where this run ends.
    pub fn is_adjacent_to(&self, next: &AddressRange) -> bool {
        self.end() == u64::from(u32::from(next.start))
    }
}

impl From<CidrBlock> for AddressRange {
    fn from(block: CidrBlock) -> AddressRange {
        AddressRange {
            start: block.base(),
            count: block.size(),
        }
    }
}

impl std::fmt::Display for AddressRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}+{}", self.start, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_block() {
        let block: CidrBlock = "192.168.0.0/23".parse().unwrap();
        let range = AddressRange::from(block);
        assert_eq!(range.start, Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(range.count, 512);
        assert_eq!(range.to_string(), "192.168.0.0+512");
    }

    #[test]
    fn test_adjacency() {
        let a = AddressRange::new(Ipv4Addr::new(10, 0, 0, 0), 256);
        let b = AddressRange::new(Ipv4Addr::new(10, 0, 1, 0), 1);
        let c = AddressRange::new(Ipv4Addr::new(10, 0, 1, 1), 1);
        assert!(a.is_adjacent_to(&b));
        assert!(!a.is_adjacent_to(&c));
        assert!(!b.is_adjacent_to(&a));
    }

    #[test]
    fn test_end_at_top_of_space() {
        let top = AddressRange::new(Ipv4Addr::new(255, 255, 255, 0), 256);
        assert_eq!(top.end(), 1u64 << 32);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty address range")]
    fn test_new_rejects_empty() {
        AddressRange::new(Ipv4Addr::new(10, 0, 0, 0), 0);
    }
}
