#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{NamingError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PORT_NAME: &str = "rpc";
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_STATUS_FILTER: &str = "0";
pub const DEFAULT_REGISTRY_URL: &str = "http://127.0.0.1:8500";

/// Settings for one naming service instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Registry entry to query. Required.
    #[serde(default)]
    pub service_name: Option<String>,
    /// Named port to pick from each instance.
    #[serde(default = "default_port_name")]
    pub port_name: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Comma-separated accepted status codes; blank accepts all.
    #[serde(default = "default_status_filter")]
    pub status_filter: String,
    #[serde(default = "default_registry_url")]
    pub registry_url: String,
}

fn default_port_name() -> Option<String> {
    Some(DEFAULT_PORT_NAME.to_string())
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_status_filter() -> String {
    DEFAULT_STATUS_FILTER.to_string()
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            service_name: None,
            port_name: default_port_name(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            status_filter: default_status_filter(),
            registry_url: default_registry_url(),
        }
    }
}

impl NamingConfig {
    pub fn for_service(service_name: impl Into<String>) -> Self {
        Self {
            service_name: Some(service_name.into()),
            ..Self::default()
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| NamingError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REGISTRY_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NamingError::ConfigParse {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Validate for NamingConfig {
    fn validate(&self) -> Result<()> {
        let service_name = validation::validate_required_field("service_name", &self.service_name)?;
        validation::validate_non_empty_string("service_name", service_name)?;

        let port_name = validation::validate_required_field("port_name", &self.port_name)?;
        validation::validate_non_empty_string("port_name", port_name)?;

        validation::validate_positive_number("timeout_ms", self.timeout_ms, 1)?;
        validation::validate_url("registry_url", &self.registry_url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_apply_to_minimal_toml() {
        let config = NamingConfig::from_toml_str(r#"service_name = "bns.user.rpc""#).unwrap();

        assert_eq!(config.service_name.as_deref(), Some("bns.user.rpc"));
        assert_eq!(config.port_name.as_deref(), Some("rpc"));
        assert_eq!(config.timeout_ms, 3000);
        assert_eq!(config.status_filter, "0");
        assert_eq!(config.registry_url, DEFAULT_REGISTRY_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_toml() {
        let toml_content = r#"
service_name = "bns.order.rpc"
port_name = "admin"
timeout_ms = 500
status_filter = ""
registry_url = "http://registry.local:9000"
"#;
        let config = NamingConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.port_name.as_deref(), Some("admin"));
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert_eq!(config.status_filter, "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BNS_NAMING_TEST_SERVICE", "bns.from.env");

        let config =
            NamingConfig::from_toml_str(r#"service_name = "${BNS_NAMING_TEST_SERVICE}""#).unwrap();
        assert_eq!(config.service_name.as_deref(), Some("bns.from.env"));

        std::env::remove_var("BNS_NAMING_TEST_SERVICE");
    }

    #[test]
    fn test_missing_service_name_fails_validation() {
        let config = NamingConfig::from_toml_str("timeout_ms = 100").unwrap();
        match config.validate() {
            Err(NamingError::MissingConfig { field }) => assert_eq!(field, "service_name"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_zero_timeout_and_bad_url_fail_validation() {
        let mut config = NamingConfig::for_service("svc");
        config.timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = NamingConfig::for_service("svc");
        config.registry_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = NamingConfig::from_toml_str("service_name = ");
        assert!(matches!(result, Err(NamingError::ConfigParse { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"service_name = \"bns.file.rpc\"\nport_name = \"rpc\"\n")
            .unwrap();

        let config = NamingConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.service_name.as_deref(), Some("bns.file.rpc"));
    }
}
