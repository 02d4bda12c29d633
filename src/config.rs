//! Server configuration
//!
//! Reads the bind address from the environment with sensible local-dev
//! defaults. Everything else (catalog, stores) is in-memory and needs no
//! configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default port when `PORT` is unset or unparseable.
const DEFAULT_PORT: u16 = 8000;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the server binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Builds a configuration from `HOST` / `PORT` environment variables.
    ///
    /// Unset or invalid values fall back to `0.0.0.0:8000`, matching the
    /// local-dev default.
    pub fn from_env() -> Self {
        let host: IpAddr = std::env::var("HOST")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            bind_addr: SocketAddr::new(host, port),
        }
    }
}
