//! Overlap and containment checks for planned subnets.
//!
//! Detects subnet blocks sharing addresses and blocks escaping their parent
//! VPC block, and logs what it finds.

use crate::models::{CidrBlock, PlanError};
use itertools::Itertools;

/// Represents two blocks sharing at least one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConflict {
    pub first: CidrBlock,
    pub second: CidrBlock,
}

/// Find every overlapping pair, sorted by the first block.
///
/// # Arguments
/// * `blocks` - The subnet blocks to check against each other
///
/// # Returns
/// A list of overlap conflicts found
pub fn find_overlapping_blocks(blocks: &[CidrBlock]) -> Vec<OverlapConflict> {
    let mut conflicts: Vec<OverlapConflict> = blocks
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.overlaps(b))
        .map(|(a, b)| OverlapConflict {
            first: *a.min(b),
            second: *a.max(b),
        })
        .collect();

    // Sort by CIDR for consistent output
    conflicts.sort_by_key(|c| (c.first, c.second));
    conflicts
}

/// Blocks not entirely within `parent`.
pub fn find_blocks_outside(parent: &CidrBlock, blocks: &[CidrBlock]) -> Vec<CidrBlock> {
    blocks
        .iter()
        .filter(|b| !parent.contains(b))
        .copied()
        .collect()
}

/// Log overlapping subnet conflicts as errors.
pub fn log_overlapping_blocks(conflicts: &[OverlapConflict]) {
    if conflicts.is_empty() {
        log::debug!("No overlapping subnet blocks found.");
        return;
    }

    log::error!("Found {} overlapping subnet block(s):", conflicts.len());
    for conflict in conflicts {
        log::error!("  {} overlaps {}", conflict.first, conflict.second);
    }
}

/// Fail if any two blocks overlap or any block leaves `parent`.
///
/// # Returns
/// * `Ok(())` - blocks are disjoint and inside the parent
/// * `Err(PlanError)` - the first conflict found
pub fn verify_blocks(parent: &CidrBlock, blocks: &[CidrBlock]) -> Result<(), PlanError> {
    if let Some(outside) = find_blocks_outside(parent, blocks).first() {
        log::error!("Subnet {outside} is outside of {parent}");
        return Err(PlanError::OutsideParent {
            subnet: outside.to_string(),
            parent: parent.to_string(),
        });
    }

    let conflicts = find_overlapping_blocks(blocks);
    log_overlapping_blocks(&conflicts);
    match conflicts.first() {
        Some(conflict) => Err(PlanError::Overlap {
            first: conflict.first.to_string(),
            second: conflict.second.to_string(),
        }),
        None => Ok(()),
    }
}
