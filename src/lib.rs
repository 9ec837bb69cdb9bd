//! `foxfunx`: a function-only infrastructure provider.
//!
//! Exposes two functions to configurations:
//! - `direxists` - whether a path is an existing directory
//! - `tocidr` - subnet + netmask to CIDR notation
//!
//! Module organization:
//! - [`models`] - IPv4 address, netmask and CIDR types
//! - [`functions`] - the [`functions::Function`] capability and its implementations
//! - [`provider`] - provider metadata, schema and function dispatch
//! - [`server`] - handshake and the request/response loop on stdio
//! - [`logging`] - log4rs setup and the per-call logger
//! - [`config`] - environment driven configuration
//! - [`error`] - function call errors

pub mod config;
pub mod error;
pub mod functions;
pub mod logging;
pub mod models;
pub mod provider;
pub mod server;

pub use error::{FuncError, FunctionError};
pub use functions::{to_cidr, Function, Value};
pub use provider::Provider;
