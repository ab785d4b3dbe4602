//! tidemark.toml configuration parser.
//!
//! All sections and values are optional; accessors fall back to the
//! built-in defaults. The daemon layers CLI flags on top of file
//! values, so a missing file is equivalent to an empty one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default API listen port.
pub const DEFAULT_PORT: u16 = 8620;

/// Default data directory for the persistent store.
pub const DEFAULT_DATA_DIR: &str = "/var/lib/tidemark";

/// Default tracing env-filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info,tidemarkd=debug,tidemark_store=debug,tidemark_registry=debug";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server: Option<ListenConfig>,
    pub storage: Option<StorageConfig>,
    pub log: Option<LogConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListenConfig {
    pub port: Option<u16>,
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    pub filter: Option<String>,
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Listen port, falling back to [`DEFAULT_PORT`].
    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_PORT)
    }

    /// Bind address, falling back to all interfaces.
    pub fn bind(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.bind.clone())
            .unwrap_or_else(|| "0.0.0.0".to_string())
    }

    /// Data directory, falling back to [`DEFAULT_DATA_DIR`].
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .as_ref()
            .and_then(|s| s.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Tracing filter directive, falling back to [`DEFAULT_LOG_FILTER`].
    pub fn log_filter(&self) -> String {
        self.log
            .as_ref()
            .and_then(|l| l.filter.clone())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.bind(), "0.0.0.0");
        assert_eq!(config.data_dir(), PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_parse_minimal() {
        let toml_str = r#"
[server]
port = 9000
"#;
        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.port(), 9000);
        assert_eq!(config.bind(), "0.0.0.0");
    }

    #[test]
    fn test_parse_full() {
        let toml_str = r#"
[server]
port = 9000
bind = "127.0.0.1"

[storage]
data_dir = "/tmp/tidemark"

[log]
filter = "debug"
"#;
        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bind(), "127.0.0.1");
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/tidemark"));
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_round_trip() {
        let config = ServerConfig {
            server: Some(ListenConfig {
                port: Some(9000),
                bind: None,
            }),
            storage: None,
            log: None,
        };
        let toml_str = config.to_toml_string().unwrap();
        let parsed: ServerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.port(), 9000);
    }
}
