pub mod naming;
pub mod port_resolver;
pub mod status_filter;

pub use crate::domain::model::{Endpoint, RawInstance, ResolvedEndpoints};
pub use crate::domain::ports::{NamingService, RegistryClient};
pub use crate::utils::error::Result;
