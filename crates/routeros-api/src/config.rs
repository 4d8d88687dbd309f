//! Client configuration file support.
//!
//! Loads and validates router access and logging settings from TOML. The
//! router section carries the parameters a transport needs to open a
//! session; this crate only validates and hands them on.

use crate::error::{RosError, RosResult};
use crate::ROUTEROS_API_PORT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Router access parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Host name or address of the router
    #[serde(default = "default_node")]
    pub node: String,

    /// API service (port number)
    #[serde(default = "default_service")]
    pub service: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

/// Complete client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub router: RouterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

fn default_node() -> String {
    "192.168.88.1".to_string()
}

fn default_service() -> String {
    ROUTEROS_API_PORT.to_string()
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            node: default_node(),
            service: default_service(),
            username: default_username(),
            password: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl ClientConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> RosResult<Self> {
        toml::from_str(content).map_err(|e| RosError::invalid_config("file", e.to_string()))
    }

    /// Loads configuration from `path`. A missing file is an error.
    pub fn load(path: impl AsRef<Path>) -> RosResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            RosError::invalid_config(path.display().to_string(), e.to_string())
        })
    }

    /// Loads configuration from `path`, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> RosResult<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(RosError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Saves configuration to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> RosResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RosError::invalid_config("file", e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validates configuration
    pub fn validate(&self) -> RosResult<()> {
        if self.router.node.trim().is_empty() {
            return Err(RosError::invalid_config("router.node", "must not be empty"));
        }

        match self.router.service.parse::<u16>() {
            Ok(0) | Err(_) => {
                return Err(RosError::invalid_config(
                    "router.service",
                    format!("'{}' is not a port number", self.router.service),
                ));
            }
            Ok(_) => {}
        }

        if self.router.username.is_empty() {
            return Err(RosError::invalid_config(
                "router.username",
                "must not be empty",
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(RosError::invalid_config(
                "logging.level",
                format!("unknown level '{}'", self.logging.level),
            ));
        }

        Ok(())
    }

    /// Returns `node:service` for log output.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.router.node, self.router.service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.router.service, "8728");
        assert_eq!(config.router.username, "admin");
        assert!(config.router.password.is_empty());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_deserialization() {
        let config = ClientConfig::from_toml(
            r#"
[router]
node = "10.0.0.1"
password = "secret"

[logging]
level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.router.node, "10.0.0.1");
        assert_eq!(config.router.password, "secret");
        // Unspecified values should use defaults
        assert_eq!(config.router.service, "8728");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.endpoint(), "10.0.0.1:8728");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ClientConfig::default();
        config.router.node = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(RosError::InvalidConfig { ref field, .. }) if field == "router.node"
        ));

        let mut config = ClientConfig::default();
        config.router.service = "api".to_string();
        assert!(config.validate().is_err());
        config.router.service = "0".to_string();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.router.username.clear();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_invalid_config() {
        let err = ClientConfig::from_toml("[router\nnode=").unwrap_err();
        assert!(matches!(err, RosError::InvalidConfig { .. }));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routeros.toml");

        let mut config = ClientConfig::default();
        config.router.node = "router.lan".to_string();
        config.logging.json = true;
        config.save(&path).unwrap();

        let loaded = ClientConfig::load(&path).unwrap();
        assert_eq!(loaded.router.node, "router.lan");
        assert!(loaded.logging.json);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ClientConfig::load("/nonexistent/routeros.toml"),
            Err(RosError::Io(_))
        ));
        let config = ClientConfig::load_or_default("/nonexistent/routeros.toml").unwrap();
        assert_eq!(config.router.service, "8728");
    }
}
