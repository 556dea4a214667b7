//! Derived VPC layout for one environment.

use super::CidrBlock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Routing tier of a subnet.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubnetTier {
    /// Routed through the internet gateway.
    Public,
    /// Routed through NAT, hosts App Runner connectors, RDS and Lambda.
    Private,
}

impl fmt::Display for SubnetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubnetTier::Public => write!(f, "public"),
            SubnetTier::Private => write!(f, "private"),
        }
    }
}

/// A single subnet of the plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlannedSubnet {
    /// Value of the `Name` tag.
    pub name: String,
    /// Public or private.
    pub tier: SubnetTier,
    /// Index of the availability zone (0-based).
    pub az_index: u32,
    /// Index within the parent block (0-based).
    pub subnet_index: u32,
    /// Address block of the subnet.
    pub cidr: CidrBlock,
}

/// The VPC block and all subnets carved from it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkPlan {
    /// Value of the VPC `Name` tag.
    pub vpc_name: String,
    /// The VPC block as configured.
    pub vpc_cidr: CidrBlock,
    /// Prefix shared by every subnet.
    pub subnet_prefix: u8,
    /// Subnets ordered by subnet index.
    pub subnets: Vec<PlannedSubnet>,
}

impl NetworkPlan {
    /// Subnets of one tier, in AZ order.
    pub fn tier(&self, tier: SubnetTier) -> impl Iterator<Item = &PlannedSubnet> {
        self.subnets.iter().filter(move |s| s.tier == tier)
    }

    /// All subnet blocks in index order.
    pub fn blocks(&self) -> Vec<CidrBlock> {
        self.subnets.iter().map(|s| s.cidr).collect()
    }
}

impl fmt::Display for PlannedSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({}, az#{})",
            self.name, self.cidr, self.tier, self.az_index
        )
    }
}

impl fmt::Display for NetworkPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} ({} subnets of /{}):",
            self.vpc_name,
            self.vpc_cidr,
            self.subnets.len(),
            self.subnet_prefix
        )?;
        for subnet in &self.subnets {
            writeln!(f, "  - {subnet}")?;
        }
        Ok(())
    }
}
