//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::api::ApiConfig;
use crate::index::{IndexConfig, ValueScope};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub templates: TemplatesConfig,

    #[serde(default)]
    pub index: IndexSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload() -> usize {
    10 * 1024 * 1024 // 10 MiB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

/// Form file storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_forms_dir")]
    pub forms_dir: String,
}

fn default_forms_dir() -> String {
    "./forms".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            forms_dir: default_forms_dir(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
}

fn default_session_ttl() -> u64 {
    24 * 60 * 60 // 24 hours
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl(),
        }
    }
}

/// Templates preloaded at startup
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default = "default_templates_dir")]
    pub dir: String,
}

fn default_templates_dir() -> String {
    "./templates".to_string()
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_templates_dir(),
        }
    }
}

/// Form index configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexSettings {
    #[serde(default)]
    pub value_scope: ValueScope,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from `FORMDECK_CONFIG`, the default locations, or environment
    pub fn load_default() -> Self {
        if let Ok(explicit) = std::env::var("FORMDECK_CONFIG") {
            let path = PathBuf::from(explicit);
            match Self::load_with_env(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {:?}", path);
                    return config;
                }
                Err(e) => tracing::warn!("Failed to load config from {:?}: {}", path, e),
            }
        }

        let config_paths = [
            dirs::config_dir().map(|p| p.join("formdeck").join("config.toml")),
            Some(PathBuf::from("/etc/formdeck/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("FORMDECK_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("FORMDECK_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Storage overrides
        if let Ok(dir) = std::env::var("FORMDECK_FORMS_DIR") {
            self.storage.forms_dir = dir;
        }

        // Index overrides
        if let Ok(scope) = std::env::var("FORMDECK_VALUE_SCOPE") {
            match scope.parse() {
                Ok(s) => self.index.value_scope = s,
                Err(e) => tracing::warn!("Ignoring FORMDECK_VALUE_SCOPE: {}", e),
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("FORMDECK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FORMDECK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Settings for the HTTP layer
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            max_upload_bytes: self.server.max_upload_bytes,
            session_ttl_secs: self.auth.session_ttl_secs,
        }
    }

    /// Settings for the form index
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            value_scope: self.index.value_scope,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Formdeck Configuration
#
# Environment variables override these settings:
# - FORMDECK_HOST
# - FORMDECK_PORT
# - FORMDECK_FORMS_DIR
# - FORMDECK_VALUE_SCOPE
# - FORMDECK_LOG_LEVEL
# - FORMDECK_LOG_FORMAT

[server]
# Server host
host = "0.0.0.0"

# Server port
port = 8080

# Largest accepted template upload (bytes)
max_upload_bytes = 10485760

[storage]
# Directory where stored forms are written as HTML files
forms_dir = "./forms"

[auth]
# Session and cookie lifetime in seconds
session_ttl_secs = 86400

[templates]
# HTML templates imported at startup (optional)
dir = "./templates"

[index]
# How queried values match stored fields:
# global       - a value matches under any field of the form
# field_scoped - a value matches only under the queried field
value_scope = "global"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.forms_dir, "./forms");
        assert_eq!(config.auth.session_ttl_secs, 86_400);
        assert_eq!(config.index.value_scope, ValueScope::Global);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse(
            r#"
            [server]
            port = 9000

            [index]
            value_scope = "field_scoped"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.index.value_scope, ValueScope::FieldScoped);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, default_port());
        assert_eq!(config.server.max_upload_bytes, default_max_upload());
        assert_eq!(config.auth.session_ttl_secs, default_session_ttl());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_api_config_conversion() {
        let mut config = Config::default();
        config.server.port = 9999;
        config.auth.session_ttl_secs = 60;

        let api = config.api_config();
        assert_eq!(api.port, 9999);
        assert_eq!(api.session_ttl_secs, 60);
        assert_eq!(api.addr(), "0.0.0.0:9999");
    }
}
