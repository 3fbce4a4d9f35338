use crate::domain::model::RawInstance;
use crate::domain::ports::RegistryClient;
use crate::utils::error::{NamingError, QueryFailureKind, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Queries a naming agent over HTTP.
///
/// `GET {base_url}/v1/services/{service_name}/instances` must answer with a
/// JSON array of instances (`null` counts as none). The service name is one
/// percent-encoded path segment.
#[derive(Debug, Clone)]
pub struct HttpRegistryClient {
    base_url: Url,
    client: Client,
}

impl HttpRegistryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Result<Self> {
        let base_url = base_url.into();
        validate_url("registry_url", &base_url)?;
        let parsed = Url::parse(&base_url).map_err(|e| NamingError::InvalidConfigValue {
            field: "registry_url".to_string(),
            value: base_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(NamingError::InvalidConfigValue {
                field: "registry_url".to_string(),
                value: base_url,
                reason: "URL cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn instances_url(&self, service_name: &str) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always accept path segments; checked in `with_client`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "services", service_name, "instances"]);
        }
        url
    }
}

fn classify(service_name: &str, err: reqwest::Error) -> NamingError {
    let kind = if err.is_timeout() {
        QueryFailureKind::Timeout
    } else if err.is_connect() || err.is_request() {
        QueryFailureKind::Unreachable
    } else {
        QueryFailureKind::Protocol
    };
    NamingError::registry(service_name, kind, err)
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn query_instances(
        &self,
        service_name: &str,
        timeout: Duration,
    ) -> Result<Vec<RawInstance>> {
        if service_name.trim().is_empty() {
            return Err(NamingError::InvalidConfigValue {
                field: "service_name".to_string(),
                value: service_name.to_string(),
                reason: "Service name cannot be empty".to_string(),
            });
        }
        if timeout.is_zero() {
            return Err(NamingError::InvalidConfigValue {
                field: "timeout_ms".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be positive".to_string(),
            });
        }

        let url = self.instances_url(service_name);
        tracing::debug!("Querying registry: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(service_name, e))?;

        let status = response.status();
        tracing::debug!("Registry response status: {}", status);
        if !status.is_success() {
            return Err(NamingError::registry(
                service_name,
                QueryFailureKind::Protocol,
                format!("registry answered HTTP {}", status),
            ));
        }

        let instances: Option<Vec<RawInstance>> =
            response.json().await.map_err(|e| classify(service_name, e))?;
        Ok(instances.unwrap_or_default())
    }
}
