//! Constrained names for every resource of an environment.

use super::naming::build_name;
use crate::config::*;
use serde::Serialize;

/// Resource names for one environment, each within its AWS length limit.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub app_runner_service: String,
    pub autoscaling_config: String,
    pub rds_identifier: String,
    pub lambda_function: String,
    /// Short source hash of the Lambda bundle, if one was computed.
    pub lambda_source_version: Option<String>,
    pub ecr_repository: String,
    pub app_runner_role: String,
    pub lambda_role: String,
    pub deploy_role: String,
    /// Only present when WAF is enabled for the environment.
    pub waf_web_acl: Option<String>,
    pub dashboard: String,
    pub budget: String,
}

impl ResourceNames {
    /// `(label, name)` pairs in declaration order, skipping absent names.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = vec![
            ("app_runner_service", self.app_runner_service.as_str()),
            ("autoscaling_config", self.autoscaling_config.as_str()),
            ("rds_identifier", self.rds_identifier.as_str()),
            ("lambda_function", self.lambda_function.as_str()),
        ];
        if let Some(version) = &self.lambda_source_version {
            entries.push(("lambda_source_version", version.as_str()));
        }
        entries.extend([
            ("ecr_repository", self.ecr_repository.as_str()),
            ("app_runner_role", self.app_runner_role.as_str()),
            ("lambda_role", self.lambda_role.as_str()),
            ("deploy_role", self.deploy_role.as_str()),
        ]);
        if let Some(waf) = &self.waf_web_acl {
            entries.push(("waf_web_acl", waf.as_str()));
        }
        entries.extend([
            ("dashboard", self.dashboard.as_str()),
            ("budget", self.budget.as_str()),
        ]);
        entries
    }
}

/// Build all resource names for `config`.
///
/// `source_hash` is the Lambda source tree hash computed once by the caller;
/// its first 8 characters become `lambda_source_version`.
pub fn build_resource_names(config: &EnvironmentConfig, source_hash: Option<&str>) -> ResourceNames {
    let app = config.app_name.as_str();
    let env = config.environment.as_str();
    let name = |purpose: &str, max: usize| build_name(app, &format!("{purpose}-{env}"), max);

    ResourceNames {
        app_runner_service: name("service", MAX_LEN_APP_RUNNER_SERVICE),
        autoscaling_config: name("autoscaling", MAX_LEN_AUTOSCALING_CONFIG),
        rds_identifier: name("db", MAX_LEN_RDS_IDENTIFIER),
        lambda_function: name("worker", MAX_LEN_LAMBDA_FUNCTION),
        lambda_source_version: source_hash.map(|h| h.chars().take(8).collect()),
        ecr_repository: name("repo", MAX_LEN_ECR_REPOSITORY).to_ascii_lowercase(),
        app_runner_role: name("apprunner-role", MAX_LEN_IAM_ROLE),
        lambda_role: name("lambda-role", MAX_LEN_IAM_ROLE),
        deploy_role: name("github-deploy", MAX_LEN_IAM_ROLE),
        waf_web_acl: config
            .waf_enabled
            .then(|| name("waf", MAX_LEN_WAF_WEB_ACL)),
        dashboard: name("dashboard", MAX_LEN_DASHBOARD),
        budget: name("budget", MAX_LEN_BUDGET),
    }
}
