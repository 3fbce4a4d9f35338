pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::HttpRegistryClient;
pub use crate::config::NamingConfig;
pub use crate::core::naming::{BnsNamingService, LazyNamingService, NamingServiceBuilder};
pub use crate::core::status_filter::StatusFilter;
pub use crate::domain::model::{Endpoint, RawInstance, ResolvedEndpoints};
pub use crate::domain::ports::{NamingService, RegistryClient};
pub use crate::utils::error::{NamingError, QueryFailureKind, Result};
