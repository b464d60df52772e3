//! Process configuration read from the environment.

use std::net::SocketAddr;

/// Listen address, e.g. `0.0.0.0:8080`.
pub const BIND_ADDR_ENV: &str = "EVPOOL_BIND_ADDR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 80)),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup; unset or invalid values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(BIND_ADDR_ENV) {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "{BIND_ADDR_ENV} is not a socket address; using {}",
                    config.bind_addr
                ),
            }
        }

        config
    }
}
