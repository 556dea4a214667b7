//! VPC layout for one environment.
//!
//! One public and one private subnet per availability zone. Public subnets
//! take the low indices, private subnets follow, so adding AZs to an existing
//! plan only grows it when the prefix stays unchanged.

use super::naming::build_name;
use super::overlap::verify_blocks;
use super::subnets::{derive_subnet_block, determine_subnet_prefix};
use crate::config::{EnvironmentConfig, MAX_LEN_NAME_TAG};
use crate::models::{parse_cidr, NetworkPlan, PlanError, PlannedSubnet, SubnetTier};

/// Derive the VPC and subnet blocks for `config`.
///
/// # Returns
/// * `Ok(NetworkPlan)` - subnets ordered by index, public first
/// * `Err(PlanError)` - if the VPC block is invalid or too small
pub fn build_network_plan(config: &EnvironmentConfig) -> Result<NetworkPlan, PlanError> {
    config.validate()?;
    let vpc_cidr = parse_cidr(&config.vpc_cidr)?;
    let env = config.environment.as_str();
    let subnet_count = config.az_count * 2;
    let subnet_prefix = determine_subnet_prefix(vpc_cidr.prefix, subnet_count)?;

    log::info!("Planning {subnet_count} /{subnet_prefix} subnets in {vpc_cidr} for {env}");

    let mut subnets = Vec::with_capacity(subnet_count as usize);
    for (tier, first_index) in [
        (SubnetTier::Public, 0),
        (SubnetTier::Private, config.az_count),
    ] {
        for az_index in 0..config.az_count {
            let subnet_index = first_index + az_index;
            let cidr = derive_subnet_block(vpc_cidr, subnet_prefix, subnet_index)?;
            let name = build_name(
                &config.app_name,
                &format!("{tier}-{}-{env}", az_index + 1),
                MAX_LEN_NAME_TAG,
            );
            log::debug!("subnet #{subnet_index} {name} {cidr}");
            subnets.push(PlannedSubnet {
                name,
                tier,
                az_index,
                subnet_index,
                cidr,
            });
        }
    }

    let plan = NetworkPlan {
        vpc_name: build_name(&config.app_name, &format!("vpc-{env}"), MAX_LEN_NAME_TAG),
        vpc_cidr,
        subnet_prefix,
        subnets,
    };
    verify_blocks(&vpc_cidr, &plan.blocks())?;
    Ok(plan)
}
