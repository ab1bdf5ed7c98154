//! Server configuration from the environment.

use std::env;

/// Address used when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `host:port` the server listens on.
    pub bind_addr: String,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(env::var("BIND_ADDR").ok())
    }

    fn from_lookup(bind_addr: Option<String>) -> Self {
        Self {
            bind_addr: bind_addr
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
        }
    }
}
