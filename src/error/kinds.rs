use std::{fmt, io};

/// Crate-wide `Result` type using [`QlError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, QlError>;

/// Top-level error type for qlcomplete operations.
///
/// Classification and mapping never produce errors; this type covers the
/// fallible edges: configuration, the resource collaborator and I/O.
#[derive(Debug)]
pub enum QlError {
    /// Configuration errors.
    Config(ConfigError),

    /// Resource collaborator errors (field and variable lookups).
    Resource(ResourceError),

    /// I/O errors.
    Io(io::Error),

    /// Dialect name that does not match any known dialect.
    UnknownDialect(String),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Resource collaborator errors.
#[derive(Debug)]
pub enum ResourceError {
    /// Backend could not be reached or returned an error.
    Unavailable(String),

    /// The requested region/account scope is not served.
    UnsupportedScope(String),

    /// None of the requested field groups is known.
    UnknownGroup(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for QlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QlError::Config(e) => write!(f, "Configuration error: {e}"),
            QlError::Resource(e) => write!(f, "Resource error: {e}"),
            QlError::Io(e) => write!(f, "I/O error: {e}"),
            QlError::UnknownDialect(name) => write!(
                f,
                "Unknown dialect '{name}' (expected one of: logs, sql, ppl, metric-math)"
            ),
            QlError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Unavailable(msg) => write!(f, "Resource backend unavailable: {msg}"),
            ResourceError::UnsupportedScope(scope) => write!(f, "Unsupported scope: {scope}"),
            ResourceError::UnknownGroup(group) => write!(f, "Unknown field group: {group}"),
        }
    }
}

impl std::error::Error for QlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QlError::Config(e) => Some(e),
            QlError::Resource(e) => Some(e),
            QlError::Io(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for ConfigError {}
impl std::error::Error for ResourceError {}

/* ========================= Conversions to QlError ========================= */

impl From<io::Error> for QlError {
    fn from(err: io::Error) -> Self {
        QlError::Io(err)
    }
}

impl From<ConfigError> for QlError {
    fn from(err: ConfigError) -> Self {
        QlError::Config(err)
    }
}

impl From<ResourceError> for QlError {
    fn from(err: ResourceError) -> Self {
        QlError::Resource(err)
    }
}

impl From<toml::de::Error> for QlError {
    fn from(err: toml::de::Error) -> Self {
        QlError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<toml::ser::Error> for QlError {
    fn from(err: toml::ser::Error) -> Self {
        QlError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<serde_json::Error> for QlError {
    fn from(err: serde_json::Error) -> Self {
        QlError::Generic(format!("JSON error: {err}"))
    }
}

impl From<String> for QlError {
    fn from(msg: String) -> Self {
        QlError::Generic(msg)
    }
}

impl From<&str> for QlError {
    fn from(msg: &str) -> Self {
        QlError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_config_error() {
        let err = QlError::from(ConfigError::InvalidValue {
            field: "completion.region".to_string(),
            value: "".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value '' for field 'completion.region'"
        );
    }

    #[test]
    fn test_display_resource_error() {
        let err = QlError::from(ResourceError::UnknownGroup("/aws/lambda/x".to_string()));
        assert_eq!(
            err.to_string(),
            "Resource error: Unknown field group: /aws/lambda/x"
        );
    }

    #[test]
    fn test_unknown_dialect_lists_choices() {
        let err = QlError::UnknownDialect("kql".to_string());
        assert!(err.to_string().contains("metric-math"));
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = QlError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(QlError::from("plain").source().is_none());
    }
}
