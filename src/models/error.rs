//! Typed errors for address planning.

use thiserror::Error;

/// Failures of the CIDR parsing and subnet derivation functions.
///
/// None of these are retryable: the configuration value (or the calling code)
/// has to change before the same call can succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    /// Malformed CIDR string, octet out of range or prefix out of range.
    #[error("Invalid CIDR format: {value}")]
    InvalidCidrFormat { value: String },

    /// The requested subnet count does not fit above the AWS minimum subnet size.
    #[error("Insufficient address space: {subnet_count} subnets in a /{base_prefix} need a /{required_prefix}, smallest allowed is /{max_prefix}")]
    InsufficientAddressSpace {
        base_prefix: u8,
        subnet_count: u32,
        required_prefix: u8,
        max_prefix: u8,
    },

    /// A child prefix describing a larger block than its parent.
    #[error("Subnet prefix /{subnet_prefix} is smaller than parent prefix /{base_prefix}")]
    SubnetPrefixTooSmall { base_prefix: u8, subnet_prefix: u8 },

    /// Subnet index past the number of children available at this prefix.
    #[error("Subnet index {subnet_index} exceeds capacity of {capacity} /{subnet_prefix} subnets in {base_cidr}")]
    SubnetCapacityExceeded {
        base_cidr: String,
        subnet_prefix: u8,
        subnet_index: u32,
        capacity: u64,
    },
}

impl CidrError {
    pub(crate) fn invalid(value: impl Into<String>) -> Self {
        CidrError::InvalidCidrFormat {
            value: value.into(),
        }
    }
}

/// Failures while assembling an environment plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Cidr(#[from] CidrError),

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Subnet {first} overlaps {second}")]
    Overlap { first: String, second: String },

    #[error("Subnet {subnet} is outside of {parent}")]
    OutsideParent { subnet: String, parent: String },

    #[error("Error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error walking {path}: {source}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },
}
