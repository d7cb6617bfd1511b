//! Process settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `TRACKER_*` environment variables and
//! configuration files, in increasing order of precedence for the former.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Configuration for the exercise tracker server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKER")]
pub struct TrackerSettings {
    /// IP address to listen on.
    pub host: Option<String>,
    /// TCP port to listen on.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// JSON snapshot file persisting users and exercises between runs.
    pub data_file: Option<PathBuf>,
    /// Number of HTTP worker threads.
    pub workers: Option<usize>,
}

impl TrackerSettings {
    /// Resolve the socket address to bind.
    ///
    /// # Errors
    /// Returns [`std::net::AddrParseError`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let host = match self.host.as_deref().map(str::trim) {
            Some(host) if !host.is_empty() => host.parse()?,
            _ => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port))
    }
}
