//! Domain models for infrastructure planning.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`CidrBlock`] - IPv4 address block with CIDR notation support
//! - [`CidrError`] and [`PlanError`] - typed failures
//! - [`NetworkPlan`] and [`PlannedSubnet`] - derived VPC layout

mod cidr;
mod error;
mod plan;

// Re-export public types
pub use cidr::{
    block_size, broadcast_addr, cut_addr, get_cidr_mask, parse_cidr, CidrBlock, NetworkAddress,
    MAX_LENGTH,
};
pub use error::{CidrError, PlanError};
pub use plan::{NetworkPlan, PlannedSubnet, SubnetTier};
