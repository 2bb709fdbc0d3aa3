//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `TICTACTOE_HOST` / `TICTACTOE_PORT` from the environment (or `.env`), then
//! command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable overriding the bind host.
pub const HOST_ENV: &str = "TICTACTOE_HOST";
/// Environment variable overriding the bind port.
pub const PORT_ENV: &str = "TICTACTOE_PORT";

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    host: String,
    /// Port to bind to.
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Creates a configuration for `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Applies overrides found through `lookup`, keyed by [`HOST_ENV`] and
    /// [`PORT_ENV`].
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV).filter(|h| !h.trim().is_empty()) {
            debug!(host = %host, "Host overridden from environment");
            self.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.port = port.trim().parse().map_err(|_| {
                ConfigError::new(format!("{} must be a port number, got {:?}", PORT_ENV, port))
            })?;
            debug!(port = self.port, "Port overridden from environment");
        }
        Ok(self)
    }

    /// Applies overrides from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Resolves the full configuration: file (if any), environment, flags.
    #[instrument]
    pub fn load(
        path: Option<&Path>,
        host: Option<String>,
        port: Option<u16>,
    ) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env()?.with_overrides(host, port))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(*config.port(), 8080);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9000").unwrap();
        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(*config.port(), 9000);
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"high\"").unwrap();
        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file() {
        let err = ServerConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::default()
            .with_env_from(|key| match key {
                HOST_ENV => Some("0.0.0.0".to_string()),
                PORT_ENV => Some("3000".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config, ServerConfig::new("0.0.0.0", 3000));

        let err = ServerConfig::default()
            .with_env_from(|key| (key == PORT_ENV).then(|| "nope".to_string()))
            .unwrap_err();
        assert!(err.message.contains(PORT_ENV));
    }

    #[test]
    fn test_flags_win() {
        let config = ServerConfig::new("0.0.0.0", 3000).with_overrides(None, Some(4000));
        assert_eq!(config, ServerConfig::new("0.0.0.0", 4000));
    }
}
