//! Registry-backed naming service.
//!
//! # Single registry entry
//!
//! A [`BnsNamingService`] is bound to exactly one registry entry
//! (`service_name`). Every signature passed to [`NamingService::list`]
//! resolves against that same entry, so all keys of the result map share one
//! endpoint list. Callers that need per-signature routing must configure one
//! naming service per registry entry.

use crate::config::NamingConfig;
use crate::core::port_resolver::resolve_port;
use crate::core::status_filter::StatusFilter;
use crate::domain::model::{Endpoint, RawInstance, ResolvedEndpoints};
use crate::domain::ports::{NamingService, RegistryClient};
use crate::utils::error::{NamingError, Result};
use crate::utils::lenient::ParseFallbacks;
use crate::utils::validation::{self, Validate};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Collects settings and produces a validated [`BnsNamingService`].
pub struct NamingServiceBuilder<C: RegistryClient> {
    client: C,
    service_name: Option<String>,
    port_name: Option<String>,
    timeout_ms: u64,
    status_filter: String,
}

impl<C: RegistryClient> NamingServiceBuilder<C> {
    pub fn new(client: C) -> Self {
        let defaults = NamingConfig::default();
        Self {
            client,
            service_name: defaults.service_name,
            port_name: defaults.port_name,
            timeout_ms: defaults.timeout_ms,
            status_filter: defaults.status_filter,
        }
    }

    pub fn from_config(client: C, config: &NamingConfig) -> Self {
        Self {
            client,
            service_name: config.service_name.clone(),
            port_name: config.port_name.clone(),
            timeout_ms: config.timeout_ms,
            status_filter: config.status_filter.clone(),
        }
    }

    pub fn service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    pub fn port_name(mut self, port_name: impl Into<String>) -> Self {
        self.port_name = Some(port_name.into());
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn status_filter(mut self, status_filter: impl Into<String>) -> Self {
        self.status_filter = status_filter.into();
        self
    }

    pub fn build(self) -> Result<BnsNamingService<C>> {
        let service_name = validation::validate_required_field("service_name", &self.service_name)?;
        validation::validate_non_empty_string("service_name", service_name)?;
        let port_name = validation::validate_required_field("port_name", &self.port_name)?;
        validation::validate_non_empty_string("port_name", port_name)?;
        validation::validate_positive_number("timeout_ms", self.timeout_ms, 1)?;

        let fallbacks = ParseFallbacks::new();
        let status_filter = StatusFilter::parse(&self.status_filter, &fallbacks);

        tracing::debug!(
            service_name = %service_name,
            port_name = %port_name,
            timeout_ms = self.timeout_ms,
            accept_all = status_filter.is_accept_all(),
            "Naming service initialized"
        );

        Ok(BnsNamingService {
            service_name: service_name.clone(),
            port_name: port_name.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            status_filter,
            fallbacks,
            client: self.client,
        })
    }
}

/// Resolves signatures through one registry entry. Immutable once built;
/// share it behind an `Arc` for concurrent callers.
pub struct BnsNamingService<C: RegistryClient> {
    client: C,
    service_name: String,
    port_name: String,
    timeout: Duration,
    status_filter: StatusFilter,
    fallbacks: ParseFallbacks,
}

impl<C: RegistryClient> BnsNamingService<C> {
    pub fn builder(client: C) -> NamingServiceBuilder<C> {
        NamingServiceBuilder::new(client)
    }

    /// Builds from a loaded config, validating it first.
    pub fn from_config(client: C, config: &NamingConfig) -> Result<Self> {
        config.validate()?;
        NamingServiceBuilder::from_config(client, config).build()
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn status_filter(&self) -> &StatusFilter {
        &self.status_filter
    }

    /// Number of malformed status tokens or port values replaced by `0`
    /// since this service was built.
    pub fn parse_fallbacks(&self) -> u64 {
        self.fallbacks.count()
    }

    fn to_endpoints(&self, instances: &[RawInstance]) -> Vec<Endpoint> {
        instances
            .iter()
            .filter(|instance| self.status_filter.accepts(instance.status))
            .map(|instance| {
                let port = resolve_port(
                    &self.port_name,
                    instance.named_ports.as_ref(),
                    instance.default_port,
                    &self.fallbacks,
                );
                Endpoint::new(instance.ip.clone(), port)
            })
            .collect()
    }
}

#[async_trait]
impl<C: RegistryClient> NamingService for BnsNamingService<C> {
    async fn list(&self, signatures: &HashSet<String>) -> Result<ResolvedEndpoints> {
        if signatures.is_empty() {
            return Ok(HashMap::new());
        }

        let instances = self
            .client
            .query_instances(&self.service_name, self.timeout)
            .await?;

        let endpoints = self.to_endpoints(&instances);
        tracing::debug!(
            service_name = %self.service_name,
            instances = instances.len(),
            kept = endpoints.len(),
            dropped = instances.len() - endpoints.len(),
            "Resolved registry instances"
        );

        let shared = if endpoints.is_empty() {
            tracing::info!(
                service_name = %self.service_name,
                "No live endpoints for service"
            );
            None
        } else {
            Some(Arc::new(endpoints))
        };

        Ok(signatures
            .iter()
            .map(|signature| (signature.clone(), shared.clone()))
            .collect())
    }
}

/// Naming service whose configuration arrives after it is wired into a
/// client. `list` fails with [`NamingError::NotInitialized`] until
/// [`LazyNamingService::initialize`] succeeds; initialization happens once.
pub struct LazyNamingService<C: RegistryClient> {
    inner: OnceLock<BnsNamingService<C>>,
}

impl<C: RegistryClient> Default for LazyNamingService<C> {
    fn default() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }
}

impl<C: RegistryClient> LazyNamingService<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&self, builder: NamingServiceBuilder<C>) -> Result<()> {
        if self.inner.get().is_some() {
            return Err(NamingError::AlreadyInitialized);
        }
        let service = builder.build()?;
        self.inner
            .set(service)
            .map_err(|_| NamingError::AlreadyInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.get().is_some()
    }

    pub fn get(&self) -> Result<&BnsNamingService<C>> {
        self.inner.get().ok_or(NamingError::NotInitialized)
    }
}

#[async_trait]
impl<C: RegistryClient> NamingService for LazyNamingService<C> {
    async fn list(&self, signatures: &HashSet<String>) -> Result<ResolvedEndpoints> {
        self.get()?.list(signatures).await
    }
}
