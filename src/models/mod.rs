//! Domain models for the provider functions.
//!
//! - [`Ipv4`] - IPv4 network address with CIDR notation support
//! - [`Netmask`] - contiguous dotted-decimal netmask

mod ipv4;

// Re-export public types
pub use ipv4::{get_cidr_mask, network_addr, parse_ipv4, prefix_len, Ipv4, Netmask, MAX_LENGTH};
