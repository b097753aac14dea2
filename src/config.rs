//! Server configuration.
//!
//! Routes live in code; the config file only carries serving knobs. Every
//! field has a default, so an empty file is a valid config.
//!
//! ```toml
//! addr = "0.0.0.0:8080"
//! method_not_allowed = true
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

/// Error loading a [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub addr: SocketAddr,
    /// Answer a path that matches with an unimplemented method with
    /// `405 Method Not Allowed` and an `Allow` header, instead of 404.
    pub method_not_allowed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            method_not_allowed: false,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(ServerConfig::from_toml_str("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let cfg = ServerConfig::from_toml_str(
            r#"
            addr = "0.0.0.0:8080"
            method_not_allowed = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:8080".parse().unwrap());
        assert!(cfg.method_not_allowed);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_addresses() {
        assert!(matches!(
            ServerConfig::from_toml_str("port = 80"),
            Err(ConfigError::Parse(_)),
        ));
        assert!(matches!(
            ServerConfig::from_toml_str(r#"addr = "nowhere""#),
            Err(ConfigError::Parse(_)),
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            ServerConfig::load("/nonexistent/waymark.toml"),
            Err(ConfigError::Io(_)),
        ));
    }
}
