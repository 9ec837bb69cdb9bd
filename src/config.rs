//! Process configuration, read from the environment.
//!
//! `main` loads `.env` through dotenv first, so every key can also live there.

use log::LevelFilter;
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

/// Magic cookie the host sets so the binary knows it runs as a plugin.
///
/// Same key and value as go-plugin uses for Terraform providers, but the
/// protocol behind it is this crate's JSON lines, not Terraform's gRPC.
pub const MAGIC_COOKIE_KEY: &str = "TF_PLUGIN_MAGIC_COOKIE";
pub const MAGIC_COOKIE_VALUE: &str =
    "d602bf8f470bc67ca7faa0386276bbdd4330efaf76d1a219cb4d6991ca9872b2";

/// Comma separated protocol versions offered by the host.
pub const PROTOCOL_VERSIONS_KEY: &str = "PLUGIN_PROTOCOL_VERSIONS";

pub const VERSION_KEY: &str = "FOXFUNX_VERSION";
pub const LOG_CONFIG_KEY: &str = "FOXFUNX_LOG_CONFIG";
pub const LOG_LEVEL_KEY: &str = "FOXFUNX_LOG";

pub const DEFAULT_VERSION: &str = "dev";
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Reported in provider metadata.
    pub version: String,
    pub log_config: PathBuf,
    pub log_level: LevelFilter,
    /// `None` when the host did not offer any, meaning any version goes.
    pub protocol_versions: Option<Vec<u32>>,
}

impl Config {
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_level = match non_empty(LOG_LEVEL_KEY) {
            Some(level) => LevelFilter::from_str(level.trim())
                .map_err(|_| format!("Invalid {LOG_LEVEL_KEY} value: {level}"))?,
            None => LevelFilter::Info,
        };

        let protocol_versions = non_empty(PROTOCOL_VERSIONS_KEY)
            .map(|v| parse_protocol_versions(&v))
            .transpose()?;

        Ok(Config {
            version: non_empty(VERSION_KEY).unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            log_config: non_empty(LOG_CONFIG_KEY)
                .unwrap_or_else(|| DEFAULT_LOG_CONFIG.to_string())
                .into(),
            log_level,
            protocol_versions,
        })
    }
}

/// Cookie check on its own, so `main` can run it before anything else is
/// read from the environment.
pub fn magic_cookie_present<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(MAGIC_COOKIE_KEY).as_deref() == Some(MAGIC_COOKIE_VALUE)
}

/// Parse a list like `"5,6"`.
pub fn parse_protocol_versions(input: &str) -> Result<Vec<u32>, Box<dyn Error>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<u32>().map_err(|e| -> Box<dyn Error> {
                format!("Invalid protocol version '{v}' in {PROTOCOL_VERSIONS_KEY}: {e}").into()
            })
        })
        .collect()
}
