//! Output formatting for environment plans.
//!
//! This module handles formatting and outputting plans:
//! - [`csv`] - CSV output formatting
//! - [`terminal`] - Terminal output with colors

mod csv;
mod terminal;

pub use csv::{aws_usable_hosts, print_resources, print_subnets, resource_rows, subnet_rows};
pub use terminal::{banner, format_field};
