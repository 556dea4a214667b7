//! IPv4 CIDR block arithmetic.
//!
//! Provides [`CidrBlock`] for representing an address range as a 32-bit base
//! address plus prefix length, along with the mask helpers subnet planning
//! builds on.

use super::CidrError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// IPv4 address as a 32-bit unsigned integer.
pub type NetworkAddress = u32;

/// Convert a CIDR prefix length to a subnet mask.
///
/// # Examples
/// ```
/// use infra_plan::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, CidrError> {
    if len > MAX_LENGTH {
        Err(CidrError::invalid(format!("/{len}")))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given address and prefix length.
pub fn cut_addr(addr: NetworkAddress, len: u8) -> Result<NetworkAddress, CidrError> {
    Ok(addr & get_cidr_mask(len)?)
}

/// Get the highest address in the block for a given address and prefix length.
pub fn broadcast_addr(addr: NetworkAddress, len: u8) -> Result<NetworkAddress, CidrError> {
    let mask = get_cidr_mask(len)?;
    Ok((addr & mask) | !mask)
}

/// Number of addresses in a block of the given prefix length.
pub fn block_size(len: u8) -> Result<u64, CidrError> {
    if len > MAX_LENGTH {
        Err(CidrError::invalid(format!("/{len}")))
    } else {
        Ok(1u64 << (MAX_LENGTH - len))
    }
}

/// Parse a `"A.B.C.D/N"` string into a [`CidrBlock`].
///
/// Requires exactly four decimal octets in `0..=255` and a prefix in `0..=32`.
/// The address is kept as given; use [`CidrBlock::network`] for the aligned base.
pub fn parse_cidr(cidr: &str) -> Result<CidrBlock, CidrError> {
    let cidr = cidr.trim();
    let (addr_part, prefix_part) = cidr
        .split_once('/')
        .ok_or_else(|| CidrError::invalid(cidr))?;

    let octets: Vec<&str> = addr_part.split('.').collect();
    if octets.len() != 4 {
        return Err(CidrError::invalid(format!(
            "{cidr} (expected 4 octets, got {})",
            octets.len()
        )));
    }

    let mut addr: NetworkAddress = 0;
    for octet in octets {
        let value = parse_decimal(octet)
            .filter(|v| *v <= 255)
            .ok_or_else(|| CidrError::invalid(format!("{cidr} (octet '{octet}')")))?;
        addr = (addr << 8) | value;
    }

    let prefix = parse_decimal(prefix_part)
        .filter(|p| *p <= MAX_LENGTH as u32)
        .ok_or_else(|| CidrError::invalid(format!("{cidr} (prefix '{prefix_part}')")))?;

    Ok(CidrBlock {
        addr,
        prefix: prefix as u8,
    })
}

// Plain ASCII digits only; `str::parse` would also accept a leading '+'.
fn parse_decimal(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// IPv4 address block in CIDR notation.
#[derive(Eq, Ord, PartialEq, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct CidrBlock {
    /// The base address as given (not necessarily aligned).
    pub addr: NetworkAddress,
    /// The prefix length (0-32).
    pub prefix: u8,
}

impl CidrBlock {
    /// Create a block from a dotted address and prefix length.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<CidrBlock, CidrError> {
        if prefix > MAX_LENGTH {
            return Err(CidrError::invalid(format!("{addr}/{prefix}")));
        }
        Ok(CidrBlock {
            addr: u32::from(addr),
            prefix,
        })
    }

    /// The base address as [`Ipv4Addr`].
    pub fn ip(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.addr)
    }

    /// Lowest (network) address of the block.
    pub fn lo(&self) -> NetworkAddress {
        self.addr & self.mask()
    }

    /// Highest (broadcast) address of the block.
    pub fn hi(&self) -> NetworkAddress {
        self.lo() | !self.mask()
    }

    /// Subnet mask of the block.
    pub fn mask(&self) -> u32 {
        // prefix is validated on construction
        get_cidr_mask(self.prefix).unwrap_or(u32::MAX)
    }

    /// Number of addresses covered.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix.min(MAX_LENGTH))
    }

    /// The same block with the host bits cleared.
    pub fn network(&self) -> CidrBlock {
        CidrBlock {
            addr: self.lo(),
            prefix: self.prefix,
        }
    }

    /// True if `other` lies entirely within this block.
    pub fn contains(&self, other: &CidrBlock) -> bool {
        other.lo() >= self.lo() && other.hi() <= self.hi()
    }

    /// True if the two blocks share at least one address.
    pub fn overlaps(&self, other: &CidrBlock) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }
}

impl FromStr for CidrBlock {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cidr(s)
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.ip(), self.prefix)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D>(deserializer: D) -> Result<CidrBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_cidr(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_cut_addr() {
        let ip = u32::from(Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(cut_addr(ip, 24).unwrap(), u32::from(Ipv4Addr::new(192, 168, 1, 0)));
        assert_eq!(cut_addr(ip, 16).unwrap(), u32::from(Ipv4Addr::new(192, 168, 0, 0)));
        assert_eq!(cut_addr(ip, 32).unwrap(), ip);
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = u32::from(Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            u32::from(Ipv4Addr::new(192, 168, 1, 255))
        );
        assert_eq!(
            broadcast_addr(ip, 8).unwrap(),
            u32::from(Ipv4Addr::new(192, 255, 255, 255))
        );
        assert_eq!(broadcast_addr(ip, 32).unwrap(), ip);
    }

    #[test]
    fn test_block_size() {
        assert_eq!(block_size(0).unwrap(), 1u64 << 32);
        assert_eq!(block_size(24).unwrap(), 256);
        assert_eq!(block_size(26).unwrap(), 64);
        assert_eq!(block_size(32).unwrap(), 1);
        assert!(block_size(33).is_err());
    }

    #[test]
    fn test_parse_cidr() {
        let block = parse_cidr("10.2.0.0/24").unwrap();
        assert_eq!(block.ip(), Ipv4Addr::new(10, 2, 0, 0));
        assert_eq!(block.prefix, 24);
        assert_eq!(block.to_string(), "10.2.0.0/24");

        let block = parse_cidr(" 0.0.0.0/0 ").unwrap();
        assert_eq!(block.addr, 0);
        assert_eq!(block.prefix, 0);
    }

    #[test]
    fn test_parse_cidr_invalid() {
        for bad in [
            "999.1.1.1/24",
            "10.0.0/24",
            "10.0.0.0.0/24",
            "10.0.0.0",
            "10.0.0.0/33",
            "10.0.0.0/",
            "10.0.0.-1/24",
            "10.0.+1.0/24",
            "a.b.c.d/8",
            "10..0.0/8",
            "",
        ] {
            let err = parse_cidr(bad).unwrap_err();
            assert!(
                matches!(err, CidrError::InvalidCidrFormat { .. }),
                "{bad} should be InvalidCidrFormat, got {err:?}"
            );
        }
    }

    #[test]
    fn test_error_names_value() {
        let err = parse_cidr("999.1.1.1/24").unwrap_err();
        assert!(err.to_string().contains("999"));
    }

    #[test]
    fn test_lo_hi() {
        let block = parse_cidr("10.0.10.77/24").unwrap();
        assert_eq!(Ipv4Addr::from(block.lo()), Ipv4Addr::new(10, 0, 10, 0));
        assert_eq!(Ipv4Addr::from(block.hi()), Ipv4Addr::new(10, 0, 10, 255));
        assert_eq!(block.network().to_string(), "10.0.10.0/24");
        assert_eq!(block.size(), 256);
    }

    #[test]
    fn test_contains_and_overlaps() {
        let vpc = parse_cidr("10.0.0.0/16").unwrap();
        let a = parse_cidr("10.0.10.0/24").unwrap();
        let b = parse_cidr("10.0.10.64/26").unwrap();
        let c = parse_cidr("10.0.11.0/24").unwrap();
        let outside = parse_cidr("10.1.0.0/24").unwrap();

        assert!(vpc.contains(&a));
        assert!(a.contains(&b));
        assert!(!b.contains(&a));
        assert!(!vpc.contains(&outside));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!vpc.overlaps(&outside));
    }

    #[test]
    fn test_cidr_cmp() {
        let ip1 = parse_cidr("10.0.0.1/24").unwrap();
        let ip2 = parse_cidr("10.0.0.2/24").unwrap();
        let ip3 = parse_cidr("10.0.0.1/24").unwrap();

        assert!(ip1 < ip2);
        assert!(ip1 == ip3);
        assert!(ip2 >= ip3);
    }

    #[test]
    fn test_serde_string_form() {
        let block: CidrBlock = serde_json::from_str("\"10.1.0.0/24\"").unwrap();
        assert_eq!(block, parse_cidr("10.1.0.0/24").unwrap());
        assert_eq!(serde_json::to_string(&block).unwrap(), "\"10.1.0.0/24\"");
        assert!(serde_json::from_str::<CidrBlock>("\"10.1.0.0/40\"").is_err());
    }
}
