// cargo watch -x 'fmt' -x 'test'

pub mod config;
pub mod models;
pub mod output;
pub mod processing;

use config::EnvironmentConfig;
use models::{NetworkPlan, PlanError};
use processing::{build_network_plan, build_resource_names, ResourceNames};
use serde::Serialize;

pub use config::{load_environment_config, Environment};
pub use models::{parse_cidr, CidrBlock, CidrError};
pub use processing::{build_name, derive_subnet_cidr, determine_subnet_prefix};

/// Everything derived from one environment's settings.
#[derive(Serialize, Debug, Clone)]
pub struct EnvironmentPlan {
    pub config: EnvironmentConfig,
    pub network: NetworkPlan,
    pub names: ResourceNames,
}

/// Derive the network plan and resource names for `config`.
///
/// `source_hash` is computed once by the caller (see
/// [`processing::hash_directory`]) and only used for naming.
pub fn plan_environment(
    config: &EnvironmentConfig,
    source_hash: Option<&str>,
) -> Result<EnvironmentPlan, PlanError> {
    let network = build_network_plan(config)?;
    let names = build_resource_names(config, source_hash);
    log::info!(
        "Planned {env}: {subnets} subnets, {names} resource names",
        env = config.environment,
        subnets = network.subnets.len(),
        names = names.entries().len()
    );
    Ok(EnvironmentPlan {
        config: config.clone(),
        network,
        names,
    })
}

/// Plan all three environments from their defaults.
pub fn plan_default_environments() -> Result<Vec<EnvironmentPlan>, PlanError> {
    Environment::ALL
        .iter()
        .map(|env| plan_environment(&EnvironmentConfig::defaults(*env), None))
        .collect()
}
