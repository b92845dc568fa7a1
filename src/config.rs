//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::error::HostError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_DIST_DIR: &str = "client/dist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub dist_dir: PathBuf,
}

impl HostConfig {
    /// Build host config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `ITDESK_BIND_ADDR`: default `0.0.0.0`
    /// - `ITDESK_DIST_DIR`: default `client/dist`
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidEnv`] when a set value does not parse.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] over an arbitrary variable source.
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// See [`HostConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = parse_or("PORT", var("PORT"), DEFAULT_PORT)?;
        let bind_addr = parse_or("ITDESK_BIND_ADDR", var("ITDESK_BIND_ADDR"), DEFAULT_BIND_ADDR)?;
        let dist_dir = var("ITDESK_DIST_DIR").map_or_else(|| PathBuf::from(DEFAULT_DIST_DIR), PathBuf::from);

        Ok(Self { bind_addr, port, dist_dir })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    #[must_use]
    pub fn index_file(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, HostError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| HostError::InvalidEnv { var, value }),
    }
}
