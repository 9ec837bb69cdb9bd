//! Plugin handshake and protocol version negotiation.
//!
//! The handshake follows go-plugin's line format, but what comes after it is
//! line-delimited JSON on stdio, not Terraform's gRPC transport. Terraform
//! itself cannot load this binary; the host is anything that speaks the JSON
//! messages in [`super::protocol`].
//!
//! The host reads one line from the plugin's stdout before talking to it:
//!
//! ```text
//! 1|6|stdio|json
//! ```
//!
//! Format: `<core_version>|<protocol_version>|<transport>|<encoding>`

use std::error::Error;

/// Version of the handshake line itself.
pub const CORE_PROTOCOL_VERSION: u32 = 1;

/// Protocol versions this provider speaks, oldest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[u32] = &[6];

pub const TRANSPORT: &str = "stdio";
pub const ENCODING: &str = "json";

/// Pick the highest version offered by the host that we also support.
///
/// `None` means the host offered nothing, so our newest version is used.
pub fn negotiate_version(offered: Option<&[u32]>) -> Result<u32, Box<dyn Error>> {
    let newest = SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .max()
        .copied()
        .ok_or("No supported protocol versions")?;

    let offered = match offered {
        None => return Ok(newest),
        Some(offered) => offered,
    };

    offered
        .iter()
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(*v))
        .max()
        .copied()
        .ok_or_else(|| -> Box<dyn Error> {
            format!(
                "Incompatible API version with plugin. Plugin versions: {:?}, host versions: {:?}",
                SUPPORTED_PROTOCOL_VERSIONS, offered
            )
            .into()
        })
}

/// The line written to stdout once the plugin is ready.
pub fn handshake_line(protocol_version: u32) -> String {
    format!("{CORE_PROTOCOL_VERSION}|{protocol_version}|{TRANSPORT}|{ENCODING}")
}
