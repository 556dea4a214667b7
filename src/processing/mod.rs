//! Planning logic.
//!
//! This module contains the pure computations behind an environment plan:
//! - [`subnets`] - Subnet prefix sizing and per-index subnet derivation
//! - [`naming`] - Constrained resource names
//! - [`network`] - Public/private subnet layout per availability zone
//! - [`overlap`] - Overlap and containment checks
//! - [`resources`] - Names for every resource of an environment
//! - [`source_hash`] - Content hash of a source directory

mod naming;
mod network;
mod overlap;
mod resources;
mod source_hash;
mod subnets;

// Re-export public functions
pub use naming::{build_name, sanitize, short_hash};
pub use network::build_network_plan;
pub use overlap::{
    find_blocks_outside, find_overlapping_blocks, log_overlapping_blocks, verify_blocks,
    OverlapConflict,
};
pub use resources::{build_resource_names, ResourceNames};
pub use source_hash::hash_directory;
pub use subnets::{
    derive_subnet_block, derive_subnet_blocks, derive_subnet_cidr, determine_subnet_prefix,
};
