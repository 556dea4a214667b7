//! Subnet prefix sizing and per-index subnet derivation.
//!
//! Pure integer arithmetic: the same base block, prefix and index always give
//! the same child block, so re-applying configuration never moves a subnet.

use crate::config::{AWS_MIN_SUBNET_PREFIX, DEFAULT_SUBNET_PREFIX_FLOOR};
use crate::models::{block_size, parse_cidr, CidrBlock, CidrError, MAX_LENGTH};

/// Bits needed to number `count` subnets, i.e. `ceil(log2(count))`.
fn index_bits(count: u32) -> u8 {
    if count <= 1 {
        0
    } else {
        (32 - (count - 1).leading_zeros()) as u8
    }
}

/// Smallest prefix able to hold `subnet_count` equal subnets in a `/base_prefix`,
/// never larger than a /26 and never smaller than a /28.
///
/// # Examples
/// ```
/// use infra_plan::processing::determine_subnet_prefix;
/// assert_eq!(determine_subnet_prefix(24, 2).unwrap(), 26);
/// assert_eq!(determine_subnet_prefix(24, 6).unwrap(), 27);
/// ```
pub fn determine_subnet_prefix(base_prefix: u8, subnet_count: u32) -> Result<u8, CidrError> {
    if base_prefix > MAX_LENGTH {
        return Err(CidrError::invalid(format!("/{base_prefix}")));
    }
    let floor = DEFAULT_SUBNET_PREFIX_FLOOR.max(base_prefix);
    let required = base_prefix + index_bits(subnet_count);
    let prefix = floor.max(required);

    if prefix > AWS_MIN_SUBNET_PREFIX {
        log::debug!(
            "{subnet_count} subnets in /{base_prefix} need /{prefix} > /{AWS_MIN_SUBNET_PREFIX}"
        );
        return Err(CidrError::InsufficientAddressSpace {
            base_prefix,
            subnet_count,
            required_prefix: prefix,
            max_prefix: AWS_MIN_SUBNET_PREFIX,
        });
    }
    Ok(prefix)
}

/// The `subnet_index`-th `/subnet_prefix` child of `base`, aligned to its network address.
pub fn derive_subnet_block(
    base: CidrBlock,
    subnet_prefix: u8,
    subnet_index: u32,
) -> Result<CidrBlock, CidrError> {
    if subnet_prefix > MAX_LENGTH {
        return Err(CidrError::invalid(format!("/{subnet_prefix}")));
    }
    if subnet_prefix < base.prefix {
        return Err(CidrError::SubnetPrefixTooSmall {
            base_prefix: base.prefix,
            subnet_prefix,
        });
    }

    let capacity = 1u64 << (subnet_prefix - base.prefix);
    if u64::from(subnet_index) >= capacity {
        return Err(CidrError::SubnetCapacityExceeded {
            base_cidr: base.to_string(),
            subnet_prefix,
            subnet_index,
            capacity,
        });
    }

    let offset = u64::from(subnet_index) * block_size(subnet_prefix)?;
    // offset < size of base, so the sum stays within the 32-bit space
    let addr = u64::from(base.lo()) + offset;
    Ok(CidrBlock {
        addr: addr as u32,
        prefix: subnet_prefix,
    })
}

/// String form of [`derive_subnet_block`] taking the base block as `"A.B.C.D/N"`.
///
/// # Examples
/// ```
/// use infra_plan::processing::derive_subnet_cidr;
/// assert_eq!(derive_subnet_cidr("10.2.0.0/24", 26, 1).unwrap(), "10.2.0.64/26");
/// ```
pub fn derive_subnet_cidr(
    base_cidr: &str,
    subnet_prefix: u8,
    subnet_index: u32,
) -> Result<String, CidrError> {
    let base = parse_cidr(base_cidr)?;
    let subnet = derive_subnet_block(base, subnet_prefix, subnet_index)?;
    Ok(subnet.to_string())
}

/// First `subnet_count` children of `base` at the prefix chosen by
/// [`determine_subnet_prefix`], in index order.
pub fn derive_subnet_blocks(base: CidrBlock, subnet_count: u32) -> Result<Vec<CidrBlock>, CidrError> {
    let subnet_prefix = determine_subnet_prefix(base.prefix, subnet_count)?;
    (0..subnet_count)
        .map(|i| derive_subnet_block(base, subnet_prefix, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_bits() {
        assert_eq!(index_bits(0), 0);
        assert_eq!(index_bits(1), 0);
        assert_eq!(index_bits(2), 1);
        assert_eq!(index_bits(3), 2);
        assert_eq!(index_bits(4), 2);
        assert_eq!(index_bits(5), 3);
        assert_eq!(index_bits(9), 4);
        assert_eq!(index_bits(u32::MAX), 32);
    }

    #[test]
    fn test_determine_subnet_prefix() {
        assert_eq!(determine_subnet_prefix(24, 2).unwrap(), 26);
        assert_eq!(determine_subnet_prefix(24, 4).unwrap(), 26);
        assert_eq!(determine_subnet_prefix(24, 5).unwrap(), 27);
        assert_eq!(determine_subnet_prefix(24, 16).unwrap(), 28);
        assert_eq!(determine_subnet_prefix(16, 6).unwrap(), 26);
        assert_eq!(determine_subnet_prefix(8, 1).unwrap(), 26);
        assert_eq!(determine_subnet_prefix(27, 1).unwrap(), 27);
        assert_eq!(determine_subnet_prefix(27, 2).unwrap(), 28);
        assert_eq!(determine_subnet_prefix(24, 0).unwrap(), 26);
    }

    #[test]
    fn test_determine_subnet_prefix_insufficient() {
        let err = determine_subnet_prefix(30, 9).unwrap_err();
        assert!(matches!(
            err,
            CidrError::InsufficientAddressSpace {
                base_prefix: 30,
                subnet_count: 9,
                ..
            }
        ));
        assert!(determine_subnet_prefix(24, 17).is_err());
        assert!(determine_subnet_prefix(29, 1).is_err());
        assert!(matches!(
            determine_subnet_prefix(33, 1),
            Err(CidrError::InvalidCidrFormat { .. })
        ));
    }

    #[test]
    fn test_derive_subnet_cidr() {
        assert_eq!(derive_subnet_cidr("10.2.0.0/24", 26, 0).unwrap(), "10.2.0.0/26");
        assert_eq!(derive_subnet_cidr("10.2.0.0/24", 26, 1).unwrap(), "10.2.0.64/26");
        assert_eq!(derive_subnet_cidr("10.2.0.0/24", 26, 3).unwrap(), "10.2.0.192/26");
        assert_eq!(derive_subnet_cidr("10.0.0.0/16", 26, 4).unwrap(), "10.0.1.0/26");
        assert_eq!(derive_subnet_cidr("10.0.0.0/16", 16, 0).unwrap(), "10.0.0.0/16");
    }

    #[test]
    fn test_derive_aligns_unaligned_base() {
        assert_eq!(derive_subnet_cidr("10.2.0.77/24", 26, 1).unwrap(), "10.2.0.64/26");
        assert_eq!(derive_subnet_cidr("255.255.255.255/0", 1, 1).unwrap(), "128.0.0.0/1");
    }

    #[test]
    fn test_derive_subnet_errors() {
        assert!(matches!(
            derive_subnet_cidr("10.2.0.0/24", 23, 0),
            Err(CidrError::SubnetPrefixTooSmall {
                base_prefix: 24,
                subnet_prefix: 23
            })
        ));
        assert!(matches!(
            derive_subnet_cidr("10.2.0.0/24", 26, 4),
            Err(CidrError::SubnetCapacityExceeded { capacity: 4, .. })
        ));
        assert!(matches!(
            derive_subnet_cidr("10.2.0.0/24", 33, 0),
            Err(CidrError::InvalidCidrFormat { .. })
        ));
        assert!(matches!(
            derive_subnet_cidr("10.2.0/24", 26, 0),
            Err(CidrError::InvalidCidrFormat { .. })
        ));
    }

    #[test]
    fn test_derive_last_block_of_address_space() {
        assert_eq!(
            derive_subnet_cidr("255.255.255.0/24", 28, 15).unwrap(),
            "255.255.255.240/28"
        );
        assert_eq!(
            derive_subnet_cidr("0.0.0.0/0", 32, u32::MAX).unwrap(),
            "255.255.255.255/32"
        );
    }

    #[test]
    fn test_derive_subnet_blocks() {
        let base = parse_cidr("10.2.0.0/24").unwrap();
        let blocks: Vec<String> = derive_subnet_blocks(base, 6)
            .unwrap()
            .iter()
            .map(|b| b.to_string())
            .collect();
        assert_eq!(
            blocks,
            vec![
                "10.2.0.0/27",
                "10.2.0.32/27",
                "10.2.0.64/27",
                "10.2.0.96/27",
                "10.2.0.128/27",
                "10.2.0.160/27",
            ]
        );
    }
}
