//! Splitting address runs into aligned CIDR blocks.
//!
//! Greedy: at each step take the largest power of two that still fits in the
//! remaining count, then shrink it until the current address is aligned to
//! it. The result is the fewest blocks that cover the run exactly.

use crate::error::{Error, Result};
use crate::models::{offset, AddressRange, CidrBlock, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Size of the IPv4 address space.
const ADDRESS_SPACE: u64 = 1 << MAX_LENGTH;

/// Split `host_count` addresses starting at `start` into CIDR blocks.
///
/// # Returns
/// * `Ok(Vec<CidrBlock>)` - ascending, disjoint, contiguous blocks (empty for 0)
/// * `Err(Error::InvalidHostCount)` - negative count, or the run would pass
///   `255.255.255.255`
///
/// # Examples
/// ```
/// use rir_cidr_summary::models::parse_addr;
/// use rir_cidr_summary::processing::split;
/// let blocks = split(parse_addr("192.168.0.0").unwrap(), 768).unwrap();
/// let text: Vec<String> = blocks.iter().map(|b| b.to_string()).collect();
/// assert_eq!(text, ["192.168.0.0/23", "192.168.2.0/24"]);
/// ```
pub fn split(start: Ipv4Addr, host_count: i64) -> Result<Vec<CidrBlock>> {
    let invalid = || Error::InvalidHostCount {
        start,
        count: host_count,
    };
    let total = u64::try_from(host_count).map_err(|_| invalid())?;
    if u64::from(u32::from(start)) + total > ADDRESS_SPACE {
        return Err(invalid());
    }

    let mut blocks = Vec::new();
    let mut remaining = total;
    let mut current = start;

    while remaining > 0 {
        let mut size = highest_power_of_two(remaining);
        while u64::from(u32::from(current)) % size != 0 {
            size >>= 1;
        }

        let prefix_len = MAX_LENGTH - size.trailing_zeros() as u8;
        blocks.push(CidrBlock::new(current, prefix_len)?);

        remaining -= size;
        // the last block may end exactly at the top of the space
        if remaining > 0 {
            current = offset(current, size)?;
        }
    }

    log::trace!(
        "split({start}, {host_count}) -> {} block(s)",
        blocks.len()
    );
    Ok(blocks)
}

/// Split a merged [`AddressRange`].
pub fn split_range(range: &AddressRange) -> Result<Vec<CidrBlock>> {
    let count = i64::try_from(range.count).map_err(|_| Error::InvalidHostCount {
        start: range.start,
        count: i64::MAX,
    })?;
    split(range.start, count)
}

/// Largest power of two `<= n`, from the bit length of `n`. `n` must be > 0.
fn highest_power_of_two(n: u64) -> u64 {
    1u64 << (63 - n.leading_zeros())
}
