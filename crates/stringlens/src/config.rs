//! Service configuration loaded from environment variables.
//!
//! | Variable               | Default     | Description                                  |
//! |------------------------|-------------|----------------------------------------------|
//! | `STRINGLENS_HOST`      | `127.0.0.1` | HTTP bind host                               |
//! | `STRINGLENS_PORT`      | `8080`      | HTTP bind port (0 picks an ephemeral port)   |
//! | `STRINGLENS_DATA_FILE` | unset       | JSON snapshot file; unset keeps data in memory |
//! | `STRINGLENS_LOG`       | `info`      | tracing filter, e.g. `stringlens=debug,info` |

use std::path::PathBuf;

pub const ENV_HOST: &str = "STRINGLENS_HOST";
pub const ENV_PORT: &str = "STRINGLENS_PORT";
pub const ENV_DATA_FILE: &str = "STRINGLENS_DATA_FILE";
pub const ENV_LOG: &str = "STRINGLENS_LOG";

/// Runtime configuration for the stringlens service process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Where records are persisted. `None` selects the in-memory store.
    pub data_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables, applying defaults where
    /// a variable is absent or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_str(ENV_HOST, &defaults.host),
            port: env_parse(ENV_PORT, defaults.port),
            data_file: std::env::var(ENV_DATA_FILE)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            log_filter: env_str(ENV_LOG, &defaults.log_filter),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
