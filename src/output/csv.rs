//! CSV output formatting for an environment plan.

use crate::models::{block_size, NetworkPlan};
use crate::processing::ResourceNames;

use super::terminal::format_field;

/// CSV rows for the subnet plan, header first.
pub fn subnet_rows(plan: &NetworkPlan) -> Vec<String> {
    let mut rows = vec![format!(
        "{idx},{tier},{az},{cidr},{hosts},{name}",
        idx = format_field("idx", 6),
        tier = format_field("tier", 10),
        az = format_field("az", 5),
        cidr = format_field("subnet_cidr", 18),
        hosts = format_field("hosts", 8),
        name = format_field("name", 30),
    )];

    for subnet in &plan.subnets {
        rows.push(format!(
            "{idx},{tier},{az},{cidr},{hosts},{name}",
            idx = format_field(subnet.subnet_index, 6),
            tier = format_field(subnet.tier, 10),
            az = format_field(subnet.az_index + 1, 5),
            cidr = format_field(subnet.cidr, 18),
            hosts = format_field(aws_usable_hosts(subnet.cidr.prefix), 8),
            name = format_field(&subnet.name, 30),
        ));
    }
    rows
}

/// CSV rows of `resource,name`, header first.
pub fn resource_rows(names: &ResourceNames) -> Vec<String> {
    let mut rows = vec![format!(
        "{},{}",
        format_field("resource", 24),
        format_field("name", 40)
    )];
    rows.extend(
        names
            .entries()
            .into_iter()
            .map(|(label, name)| format!("{},{}", format_field(label, 24), format_field(name, 40))),
    );
    rows
}

/// Usable addresses in an AWS subnet: AWS reserves 5 per subnet.
pub fn aws_usable_hosts(prefix: u8) -> u64 {
    block_size(prefix).map(|n| n.saturating_sub(5)).unwrap_or(0)
}

/// Print the subnet plan as CSV to stdout.
pub fn print_subnets(plan: &NetworkPlan) {
    log::info!(
        "#Start print_subnets() {} subnets of /{}",
        plan.subnets.len(),
        plan.subnet_prefix
    );
    for row in subnet_rows(plan) {
        println!("{row}");
    }
}

/// Print resource names as CSV to stdout.
pub fn print_resources(names: &ResourceNames) {
    for row in resource_rows(names) {
        println!("{row}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, EnvironmentConfig};
    use crate::processing::{build_network_plan, build_resource_names};

    #[test]
    fn test_aws_usable_hosts() {
        assert_eq!(aws_usable_hosts(24), 251);
        assert_eq!(aws_usable_hosts(26), 59);
        assert_eq!(aws_usable_hosts(28), 11);
        assert_eq!(aws_usable_hosts(32), 0);
    }

    #[test]
    fn test_subnet_rows() {
        let plan = build_network_plan(&EnvironmentConfig::defaults(Environment::Dev)).unwrap();
        let rows = subnet_rows(&plan);
        assert_eq!(rows.len(), 5);
        assert!(rows[0].contains("\"subnet_cidr\""));
        assert!(rows[1].contains("\"10.0.0.0/26\""));
        assert!(rows[1].contains("\"public\""));
        assert!(rows[4].contains("\"app-private-2-dev\""));
    }

    #[test]
    fn test_resource_rows() {
        let names = build_resource_names(&EnvironmentConfig::defaults(Environment::Prod), None);
        let rows = resource_rows(&names);
        assert_eq!(rows.len(), names.entries().len() + 1);
        assert!(rows.iter().any(|r| r.contains("\"app-waf-prod\"")));
    }
}
