use crate::domain::model::{RawInstance, ResolvedEndpoints};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;

/// Query primitive against an external service registry.
///
/// Implementations must be safe to call concurrently. A service with no
/// registered instances yields `Ok(vec![])`, never an error. Failures are
/// reported as `NamingError::RegistryQuery` and are not retried here.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    async fn query_instances(&self, service_name: &str, timeout: Duration)
        -> Result<Vec<RawInstance>>;
}

/// Resolves RPC service signatures into dialable endpoints.
///
/// Implementations backed by a single registry entry resolve *every*
/// requested signature against the same instance set, so all keys of the
/// returned map carry the same endpoint list.
#[async_trait]
pub trait NamingService: Send + Sync {
    async fn list(&self, signatures: &HashSet<String>) -> Result<ResolvedEndpoints>;
}

#[async_trait]
impl<T: RegistryClient + ?Sized> RegistryClient for std::sync::Arc<T> {
    async fn query_instances(
        &self,
        service_name: &str,
        timeout: Duration,
    ) -> Result<Vec<RawInstance>> {
        (**self).query_instances(service_name, timeout).await
    }
}
