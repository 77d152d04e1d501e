//! Configuration management for qlcomplete
//!
//! This module handles loading, parsing, and managing configuration from various sources:
//! - Configuration files (TOML format)
//! - Environment variables
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::completion::{CompletionSettings, ResourceScope, StaticResourceProvider};
use crate::dialect::Dialect;
use crate::error::{ConfigError, QlError, Result};

/// Environment variable overriding the default dialect
pub const ENV_DIALECT: &str = "QLCOMPLETE_DIALECT";

/// Environment variable overriding the region
pub const ENV_REGION: &str = "QLCOMPLETE_REGION";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "QLCOMPLETE_LOG_LEVEL";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Completion engine configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Interactive shell configuration
    #[serde(default)]
    pub repl: ReplConfig,
}

/// Completion-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Dialect used when none is given on the command line
    #[serde(default)]
    pub dialect: Dialect,

    /// Region field lookups are scoped to
    #[serde(default = "default_region")]
    pub region: String,

    /// Account field lookups are scoped to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Field groups (log groups) queries run against
    #[serde(default)]
    pub field_groups: Vec<String>,

    /// Template variable names offered as `$name`
    #[serde(default)]
    pub template_variables: Vec<String>,

    /// Field names per group, served by the bundled resource provider
    #[serde(default)]
    pub field_catalog: BTreeMap<String, Vec<String>>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Interactive shell configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Maximum number of history entries
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,

    /// Enable syntax highlighting
    #[serde(default = "default_highlighting")]
    pub highlighting: bool,
}

// Default value functions
fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

fn default_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".qlcomplete_history")
}

fn default_highlighting() -> bool {
    true
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            region: default_region(),
            account_id: None,
            field_groups: Vec::new(),
            template_variables: Vec::new(),
            field_catalog: BTreeMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            history_size: default_history_size(),
            history_file: default_history_file(),
            highlighting: default_highlighting(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// An explicit path must exist. Without one, the default path is tried
    /// and a missing file yields the default configuration.
    ///
    /// # Arguments
    /// * `path` - Explicit configuration file path, if any
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = Self::default_config_path();
                if !default_path.exists() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `QLCOMPLETE_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of an environment variable, if set
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dialect) = lookup(ENV_DIALECT) {
            self.completion.dialect = dialect.parse()?;
        }
        if let Some(region) = lookup(ENV_REGION) {
            self.completion.region = region;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level.parse()?;
        }
        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - `<config dir>/qlcomplete/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qlcomplete")
            .join("config.toml")
    }

    /// Save configuration to a file
    ///
    /// # Arguments
    /// * `path` - Path where to save the configuration
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.completion.region.trim().is_empty() {
            return Err(invalid("completion.region", &self.completion.region));
        }

        let mut seen = HashSet::new();
        for group in &self.completion.field_groups {
            if !seen.insert(group.as_str()) {
                return Err(invalid("completion.field_groups", group));
            }
        }

        if self.repl.history_size == 0 {
            return Err(invalid("repl.history_size", "0"));
        }

        Ok(())
    }

    /// Settings handed to the completion engine
    pub fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            scope: ResourceScope::new(
                self.completion.region.clone(),
                self.completion.account_id.clone(),
            ),
            field_groups: self.completion.field_groups.clone(),
        }
    }

    /// Resource provider serving the configured field catalog
    pub fn resource_provider(&self) -> StaticResourceProvider {
        let fields: HashMap<String, Vec<String>> = self
            .completion
            .field_catalog
            .iter()
            .map(|(group, fields)| (group.clone(), fields.clone()))
            .collect();
        StaticResourceProvider::new(fields, self.completion.template_variables.clone())
    }
}

fn invalid(field: &str, value: &str) -> QlError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl FromStr for LogLevel {
    type Err = QlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(invalid("logging.level", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::ResourceProvider;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.completion.dialect, Dialect::Logs);
        assert_eq!(config.completion.region, "us-east-1");
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.repl.highlighting);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.completion.dialect = Dialect::MetricMath;
        config.completion.account_id = Some("123456789012".to_string());
        config.completion.field_groups = vec!["app".to_string()];
        config
            .completion
            .field_catalog
            .insert("app".to_string(), vec!["@message".to_string()]);

        let text = config.to_toml().unwrap();
        assert!(text.contains("dialect = \"metric-math\""));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [completion]
            dialect = "sql"
            field_groups = ["app", "web"]

            [completion.field_catalog]
            app = ["@message", "level"]
            "#,
        )
        .unwrap();
        assert_eq!(config.completion.dialect, Dialect::Sql);
        assert_eq!(config.completion.region, "us-east-1");
        assert_eq!(config.repl.history_size, 1000);
        assert_eq!(config.completion.field_catalog["app"].len(), 2);
    }

    #[test]
    fn test_invalid_format() {
        let err = Config::from_toml("[completion]\ndialect = 3").unwrap_err();
        assert!(matches!(err, QlError::Config(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_explicit_missing_file() {
        let path = std::env::temp_dir().join("qlcomplete-missing-config.toml");
        let err = Config::load_from_file(Some(&path)).unwrap_err();
        assert!(matches!(err, QlError::Config(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("qlcomplete-test-{}", std::process::id()))
            .join("config.toml");
        let mut config = Config::default();
        config.completion.region = "eu-west-1".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load_from_file(Some(&path)).unwrap();
        assert_eq!(loaded.completion.region, "eu-west-1");
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_from(|key| match key {
                ENV_DIALECT => Some("ppl".to_string()),
                ENV_REGION => Some("ap-south-1".to_string()),
                ENV_LOG_LEVEL => Some("DEBUG".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.completion.dialect, Dialect::Ppl);
        assert_eq!(config.completion.region, "ap-south-1");
        assert_eq!(config.logging.level, LogLevel::Debug);

        let err = config
            .apply_env_from(|key| (key == ENV_DIALECT).then(|| "kql".to_string()))
            .unwrap_err();
        assert!(matches!(err, QlError::UnknownDialect(_)));
    }

    #[test]
    fn test_validate_rejects_invalid_values() {
        let mut config = Config::default();
        config.completion.region = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.completion.field_groups = vec!["a".to_string(), "a".to_string()];
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            QlError::Config(ConfigError::InvalidValue { ref field, .. }) if field == "completion.field_groups"
        ));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_completion_settings_and_provider() {
        let mut config = Config::default();
        config.completion.account_id = Some("42".to_string());
        config.completion.field_groups = vec!["app".to_string()];
        config.completion.template_variables = vec!["env".to_string()];
        config
            .completion
            .field_catalog
            .insert("app".to_string(), vec!["level".to_string()]);

        let settings = config.completion_settings();
        assert_eq!(settings.scope.account_id.as_deref(), Some("42"));
        assert_eq!(settings.field_groups, vec!["app".to_string()]);

        let provider = config.resource_provider();
        let fields = tokio_test::block_on(provider.field_names(
            Dialect::Logs,
            &settings.scope,
            &settings.field_groups,
        ))
        .unwrap();
        assert_eq!(fields, vec!["level".to_string()]);
        let variables = tokio_test::block_on(provider.template_variables()).unwrap();
        assert_eq!(variables, vec!["env".to_string()]);
    }
}
