use std::fmt;
use thiserror::Error;

/// Why a registry query failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFailureKind {
    Unreachable,
    Timeout,
    Protocol,
}

impl fmt::Display for QueryFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueryFailureKind::Unreachable => "unreachable",
            QueryFailureKind::Timeout => "timeout",
            QueryFailureKind::Protocol => "protocol error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Lifecycle,
    Registry,
    System,
}

#[derive(Error, Debug)]
pub enum NamingError {
    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Naming service used before initialization")]
    NotInitialized,

    #[error("Naming service is already initialized")]
    AlreadyInitialized,

    #[error("Registry query for '{service}' failed ({kind}): {source}")]
    RegistryQuery {
        service: String,
        kind: QueryFailureKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NamingError {
    pub fn registry(
        service: impl Into<String>,
        kind: QueryFailureKind,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        NamingError::RegistryQuery {
            service: service.into(),
            kind,
            source: source.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            NamingError::MissingConfig { .. }
            | NamingError::InvalidConfigValue { .. }
            | NamingError::ConfigParse { .. } => ErrorCategory::Configuration,
            NamingError::NotInitialized | NamingError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            NamingError::RegistryQuery { .. } => ErrorCategory::Registry,
            NamingError::Io(_) | NamingError::Serialization(_) => ErrorCategory::System,
        }
    }

    /// Whether a caller-side retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NamingError::RegistryQuery {
                kind: QueryFailureKind::Timeout | QueryFailureKind::Unreachable,
                ..
            }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NamingError::MissingConfig { .. } => {
                "Set the missing option in the config file or on the command line"
            }
            NamingError::InvalidConfigValue { .. } | NamingError::ConfigParse { .. } => {
                "Check the configuration value against the documented format"
            }
            NamingError::NotInitialized => "Initialize the naming service before calling list",
            NamingError::AlreadyInitialized => {
                "Build a new naming service to change its configuration"
            }
            NamingError::RegistryQuery {
                kind: QueryFailureKind::Timeout,
                ..
            } => "Retry later or raise timeout_ms",
            NamingError::RegistryQuery {
                kind: QueryFailureKind::Unreachable,
                ..
            } => "Check that the registry agent is running and registry_url is correct",
            NamingError::RegistryQuery { .. } => {
                "Check that the registry agent speaks the expected JSON format"
            }
            NamingError::Io(_) => "Check file paths and permissions",
            NamingError::Serialization(_) => "Report this as a bug",
        }
    }
}

pub type Result<T> = std::result::Result<T, NamingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_timeout_is_retryable() {
        let err = NamingError::registry("svc", QueryFailureKind::Timeout, "deadline exceeded");
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Registry);
        assert_eq!(
            err.to_string(),
            "Registry query for 'svc' failed (timeout): deadline exceeded"
        );
    }

    #[test]
    fn test_protocol_and_config_errors_are_not_retryable() {
        let protocol = NamingError::registry("svc", QueryFailureKind::Protocol, "bad json");
        assert!(!protocol.is_retryable());

        let missing = NamingError::MissingConfig {
            field: "service_name".to_string(),
        };
        assert!(!missing.is_retryable());
        assert_eq!(missing.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_lifecycle_errors() {
        assert_eq!(NamingError::NotInitialized.category(), ErrorCategory::Lifecycle);
        assert_eq!(
            NamingError::AlreadyInitialized.category(),
            ErrorCategory::Lifecycle
        );
        assert!(!NamingError::AlreadyInitialized.is_retryable());
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error;

        let err = NamingError::registry("svc", QueryFailureKind::Unreachable, "connection refused");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("connection refused"));
    }
}
