//! IPv4 CIDR blocks and their address ranges
//!
//! A [`Cidr`] is a network address plus a prefix length. The address is always
//! canonical: host bits below the prefix are zero. Addresses are handled as
//! `u32` in network byte order, so ordering by address is plain integer ordering.

use crate::error::{InspectorError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Number of bits in an IPv4 address
pub const IPV4_BITS: u8 = 32;

/// Netmask for a prefix length, as a host-order integer
#[inline]
fn netmask(prefix_len: u8) -> u32 {
    match prefix_len {
        0 => 0,
        n => u32::MAX << (IPV4_BITS - n),
    }
}

/// Inclusive range of addresses covered by a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRange {
    /// First address of the range
    pub first: u32,
    /// Last address of the range (inclusive)
    pub last: u32,
}

impl BlockRange {
    pub fn new(first: u32, last: u32) -> Self {
        debug_assert!(first <= last);
        BlockRange { first, last }
    }

    /// Check if `other` lies entirely inside this range
    pub fn contains(&self, other: &BlockRange) -> bool {
        other.first >= self.first && other.last <= self.last
    }

    /// Check if the two ranges share at least one address
    pub fn overlaps(&self, other: &BlockRange) -> bool {
        !(self.last < other.first || other.last < self.first)
    }

    /// Number of addresses in the range, never zero
    pub fn size(&self) -> u64 {
        u64::from(self.last - self.first) + 1
    }
}

/// An IPv4 CIDR block
///
/// # Examples
///
/// ```
/// use vpc_inspector::Cidr;
///
/// let block: Cidr = "10.64.0.0/10".parse().unwrap();
/// assert_eq!(block.prefix_len(), 10);
/// assert_eq!(block.size(), 1 << 22);
/// assert_eq!(block.to_string(), "10.64.0.0/10");
///
/// // Host bits are masked off
/// let masked: Cidr = "10.1.2.3/8".parse().unwrap();
/// assert_eq!(masked.to_string(), "10.0.0.0/8");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cidr {
    network: u32,
    prefix_len: u8,
}

impl Cidr {
    /// Create the block of the given prefix length containing `addr`
    ///
    /// # Errors
    ///
    /// Returns `InvalidCidr` if `prefix_len` exceeds 32.
    pub fn new(addr: Ipv4Addr, prefix_len: u8) -> Result<Self> {
        Self::from_u32(u32::from(addr), prefix_len)
    }

    /// Same as [`Cidr::new`], taking the address as an integer
    pub fn from_u32(addr: u32, prefix_len: u8) -> Result<Self> {
        if prefix_len > IPV4_BITS {
            return Err(InspectorError::InvalidCidr(format!(
                "{}/{}",
                Ipv4Addr::from(addr),
                prefix_len
            )));
        }

        Ok(Cidr {
            network: addr & netmask(prefix_len),
            prefix_len,
        })
    }

    /// Build a block whose start is already known to be aligned
    pub(crate) fn aligned(network: u32, prefix_len: u8) -> Self {
        debug_assert!(prefix_len <= IPV4_BITS);
        debug_assert_eq!(network & !netmask(prefix_len), 0);
        Cidr {
            network,
            prefix_len,
        }
    }

    /// Network (first) address
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.network)
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Netmask as a dotted address
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(netmask(self.prefix_len))
    }

    /// First address as an integer
    pub fn first(&self) -> u32 {
        self.network
    }

    /// Last address as an integer
    pub fn last(&self) -> u32 {
        self.network | !netmask(self.prefix_len)
    }

    /// Number of addresses in the block (`2^(32 - prefix_len)`)
    pub fn size(&self) -> u64 {
        1u64 << (IPV4_BITS - self.prefix_len)
    }

    pub fn range(&self) -> BlockRange {
        BlockRange::new(self.first(), self.last())
    }

    /// Check if `other` lies entirely inside this block
    pub fn contains(&self, other: &Cidr) -> bool {
        self.range().contains(&other.range())
    }

    /// Check if a single address falls inside this block
    pub fn contains_addr(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & netmask(self.prefix_len) == self.network
    }

    /// Check if the two blocks share at least one address
    pub fn overlaps(&self, other: &Cidr) -> bool {
        self.range().overlaps(&other.range())
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix_len)
    }
}

impl FromStr for Cidr {
    type Err = InspectorError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || InspectorError::InvalidCidr(s.to_string());

        let (addr, prefix) = s.trim().split_once('/').ok_or_else(invalid)?;
        let addr: Ipv4Addr = addr.parse().map_err(|_| invalid())?;
        let prefix_len: u8 = prefix.parse().map_err(|_| invalid())?;

        Cidr::new(addr, prefix_len).map_err(|_| invalid())
    }
}

impl Serialize for Cidr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
