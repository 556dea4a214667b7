//! Constants and per-environment settings.
//!
//! Every environment (dev, staging, prod) has a typed [`EnvironmentConfig`]
//! with documented defaults. A JSON file may override any field, and
//! `INFRA_*` environment variables override the file.

use crate::models::{parse_cidr, PlanError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Subnets are never planned larger than this prefix. Tunable, not an invariant.
pub const DEFAULT_SUBNET_PREFIX_FLOOR: u8 = 26;

/// Smallest subnet AWS accepts in a VPC (/28, 16 addresses).
pub const AWS_MIN_SUBNET_PREFIX: u8 = 28;

/// Shortest name the name builder will return.
pub const MIN_NAME_LENGTH: usize = 4;

/// Substituted when a base name sanitizes to nothing.
pub const NAME_FALLBACK: &str = "resource";

/// Filler used to pad short names up to [`MIN_NAME_LENGTH`].
pub const NAME_PAD: char = '0';

/// Upper bound for availability zones per environment.
pub const MAX_AZ_COUNT: u32 = 6;

// AWS name length limits.
pub const MAX_LEN_APP_RUNNER_SERVICE: usize = 40;
pub const MAX_LEN_AUTOSCALING_CONFIG: usize = 32;
pub const MAX_LEN_RDS_IDENTIFIER: usize = 63;
pub const MAX_LEN_LAMBDA_FUNCTION: usize = 64;
pub const MAX_LEN_ECR_REPOSITORY: usize = 256;
pub const MAX_LEN_IAM_ROLE: usize = 64;
pub const MAX_LEN_WAF_WEB_ACL: usize = 128;
pub const MAX_LEN_DASHBOARD: usize = 255;
pub const MAX_LEN_BUDGET: usize = 100;
pub const MAX_LEN_NAME_TAG: usize = 255;

/// Deployment environment.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Environment::Dev, Environment::Staging, Environment::Prod];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "staging" | "stage" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(PlanError::InvalidConfig {
                reason: format!("unknown environment '{other}'"),
            }),
        }
    }
}

/// Settings the network plan and resource names are derived from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Which environment these settings belong to.
    pub environment: Environment,
    /// Human-readable application name, used as base of every resource name.
    pub app_name: String,
    /// VPC block, e.g. `10.2.0.0/24`.
    pub vpc_cidr: String,
    /// Availability zones to spread subnets over.
    pub az_count: u32,
    /// Run RDS Multi-AZ.
    pub multi_az: bool,
    /// Put a WAF web ACL in front of the service.
    pub waf_enabled: bool,
    /// Monthly budget alarm threshold.
    pub budget_limit_usd: u32,
}

impl EnvironmentConfig {
    /// Defaults for an environment.
    pub fn defaults(environment: Environment) -> EnvironmentConfig {
        let (vpc_cidr, az_count, multi_az, waf_enabled, budget_limit_usd) = match environment {
            Environment::Dev => ("10.0.0.0/24", 2, false, false, 50),
            Environment::Staging => ("10.1.0.0/24", 2, false, true, 100),
            Environment::Prod => ("10.2.0.0/24", 3, true, true, 500),
        };
        EnvironmentConfig {
            environment,
            app_name: "app".to_string(),
            vpc_cidr: vpc_cidr.to_string(),
            az_count,
            multi_az,
            waf_enabled,
            budget_limit_usd,
        }
    }

    /// Reject settings no plan can be built from.
    pub fn validate(&self) -> Result<(), PlanError> {
        parse_cidr(&self.vpc_cidr)?;
        if self.az_count == 0 || self.az_count > MAX_AZ_COUNT {
            return Err(PlanError::InvalidConfig {
                reason: format!("az_count {} not in 1..={MAX_AZ_COUNT}", self.az_count),
            });
        }
        if self.app_name.trim().is_empty() {
            return Err(PlanError::InvalidConfig {
                reason: "app_name is empty".to_string(),
            });
        }
        Ok(())
    }
}

/// On-disk form: every field optional, missing ones come from the defaults.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct EnvironmentConfigFile {
    app_name: Option<String>,
    vpc_cidr: Option<String>,
    az_count: Option<u32>,
    multi_az: Option<bool>,
    waf_enabled: Option<bool>,
    budget_limit_usd: Option<u32>,
}

/// Parse a JSON settings document on top of the environment's defaults.
pub fn parse_environment_config(
    json: &str,
    environment: Environment,
) -> Result<EnvironmentConfig, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let file: EnvironmentConfigFile = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing config JSON: path={} error={}", e.path(), e))?;

    let mut config = EnvironmentConfig::defaults(environment);
    if let Some(app_name) = file.app_name {
        config.app_name = app_name;
    }
    if let Some(vpc_cidr) = file.vpc_cidr {
        config.vpc_cidr = vpc_cidr;
    }
    if let Some(az_count) = file.az_count {
        config.az_count = az_count;
    }
    if let Some(multi_az) = file.multi_az {
        config.multi_az = multi_az;
    }
    if let Some(waf_enabled) = file.waf_enabled {
        config.waf_enabled = waf_enabled;
    }
    if let Some(budget) = file.budget_limit_usd {
        config.budget_limit_usd = budget;
    }
    Ok(config)
}

/// Load settings for `environment`, from `path` if given, else the defaults.
///
/// # Returns
/// * `Ok(EnvironmentConfig)` - validated settings
/// * `Err` - if the file is missing, malformed or fails validation
pub fn load_environment_config(
    path: Option<&str>,
    environment: Environment,
) -> Result<EnvironmentConfig, Box<dyn Error>> {
    let config = match path {
        Some(file) => {
            log::info!("Reading {environment} settings from {file}");
            let json = std::fs::read_to_string(file)
                .map_err(|e| format!("Error reading config file {file}: {e}"))?;
            parse_environment_config(&json, environment)?
        }
        None => {
            log::info!("Using built-in {environment} defaults");
            EnvironmentConfig::defaults(environment)
        }
    };
    config.validate()?;
    Ok(config)
}

/// Apply `INFRA_*` overrides. `lookup` is normally `|k| std::env::var(k).ok()`.
pub fn apply_env_overrides<F>(
    mut config: EnvironmentConfig,
    lookup: F,
) -> Result<EnvironmentConfig, PlanError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(app_name) = lookup("INFRA_APP_NAME") {
        log::debug!("INFRA_APP_NAME override: {app_name}");
        config.app_name = app_name;
    }
    if let Some(vpc_cidr) = lookup("INFRA_VPC_CIDR") {
        log::debug!("INFRA_VPC_CIDR override: {vpc_cidr}");
        config.vpc_cidr = vpc_cidr;
    }
    if let Some(az_count) = lookup("INFRA_AZ_COUNT") {
        config.az_count = az_count
            .trim()
            .parse()
            .map_err(|_| PlanError::InvalidConfig {
                reason: format!("INFRA_AZ_COUNT '{az_count}' is not a number"),
            })?;
    }
    if let Some(waf) = lookup("INFRA_WAF_ENABLED") {
        config.waf_enabled = match waf.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => {
                return Err(PlanError::InvalidConfig {
                    reason: format!("INFRA_WAF_ENABLED '{waf}' is not a boolean"),
                })
            }
        };
    }
    config.validate()?;
    Ok(config)
}
