//! IPv4 address codec and CIDR block type.
//!
//! Provides [`CidrBlock`] for network-aligned prefixes, along with the
//! address helpers the splitter and merger are built on.

use crate::error::{Error, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Parse a dotted-quad address.
///
/// Accepts exactly four dot-separated decimal octets in `0..=255`. Leading
/// zeros are rejected so every accepted string is already canonical.
///
/// # Examples
/// ```
/// use rir_cidr_summary::models::parse_addr;
/// assert_eq!(parse_addr("192.168.0.1").unwrap().octets(), [192, 168, 0, 1]);
/// assert!(parse_addr("192.168.0").is_err());
/// ```
pub fn parse_addr(text: &str) -> Result<Ipv4Addr> {
    let text = text.trim();
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(Error::AddressFormat(text.to_string()));
    }

    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(parts) {
        let digits_only = !part.is_empty()
            && part.len() <= 3
            && part.bytes().all(|b| b.is_ascii_digit())
            && !(part.len() > 1 && part.starts_with('0'));
        if !digits_only {
            return Err(Error::AddressFormat(text.to_string()));
        }
        *octet = part
            .parse()
            .map_err(|_| Error::AddressFormat(text.to_string()))?;
    }
    Ok(Ipv4Addr::from(octets))
}

/// Canonical dotted-quad form of an address.
pub fn format_addr(addr: Ipv4Addr) -> String {
    addr.to_string()
}

/// Add `n` to an address, failing instead of wrapping past `255.255.255.255`.
pub fn offset(addr: Ipv4Addr, n: u64) -> Result<Ipv4Addr> {
    u64::from(u32::from(addr))
        .checked_add(n)
        .and_then(|bits| u32::try_from(bits).ok())
        .map(Ipv4Addr::from)
        .ok_or(Error::AddressRangeOverflow { addr, offset: n })
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use rir_cidr_summary::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(Error::CidrFormat(format!("/{len}")))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// A network-aligned IPv4 prefix.
///
/// The fields are private: every constructor checks that `base` has no bits
/// set below the prefix, so a misaligned block cannot exist.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct CidrBlock {
    base: Ipv4Addr,
    prefix_len: u8,
}

impl CidrBlock {
    /// Build a block, rejecting prefixes longer than 32 and misaligned bases.
    pub fn new(base: Ipv4Addr, prefix_len: u8) -> Result<CidrBlock> {
        let mask = get_cidr_mask(prefix_len)?;
        if u32::from(base) & !mask != 0 {
            return Err(Error::CidrFormat(format!("{base}/{prefix_len}")));
        }
        Ok(CidrBlock { base, prefix_len })
    }

    /// Network address of the block.
    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    /// Number of leading network bits, `0..=32`.
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Number of addresses in the block, `2^(32 - prefix_len)`.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix_len)
    }

    /// Highest (broadcast) address in the block.
    pub fn last(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base) | !self.mask_bits())
    }

    /// Dotted subnet mask, e.g. `255.255.255.0` for a /24.
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask_bits())
    }

    fn mask_bits(&self) -> u32 {
        // prefix_len <= 32 is guaranteed by the constructors
        ((u32::MAX as u64 >> (MAX_LENGTH - self.prefix_len)) << (MAX_LENGTH - self.prefix_len))
            as u32
    }
}

impl FromStr for CidrBlock {
    type Err = Error;

    /// Parse `"a.b.c.d/n"`.
    fn from_str(s: &str) -> Result<CidrBlock> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 {
            return Err(Error::CidrFormat(s.to_string()));
        }
        let base = parse_addr(parts[0]).map_err(|_| Error::CidrFormat(s.to_string()))?;
        // digits only, no sign and no leading zero
        if parts[1].is_empty()
            || !parts[1].bytes().all(|b| b.is_ascii_digit())
            || (parts[1].len() > 1 && parts[1].starts_with('0'))
        {
            return Err(Error::CidrFormat(s.to_string()));
        }
        let prefix_len: u8 = parts[1]
            .parse()
            .map_err(|_| Error::CidrFormat(s.to_string()))?;
        CidrBlock::new(base, prefix_len).map_err(|_| Error::CidrFormat(s.to_string()))
    }
}

impl std::fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D>(deserializer: D) -> std::result::Result<CidrBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CidrBlock::from_str(&s).map_err(de::Error::custom)
    }
}
