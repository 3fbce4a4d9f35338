use super::NamingConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "bns-naming")]
#[command(about = "Resolve RPC service signatures to endpoints via the naming registry")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Registry entry to query (overrides the config file)
    #[arg(long)]
    pub service_name: Option<String>,

    /// Named port to select on each instance
    #[arg(long)]
    pub port_name: Option<String>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Accepted status codes, comma separated; pass "" to accept all
    #[arg(long)]
    pub status_filter: Option<String>,

    #[arg(long)]
    pub registry_url: Option<String>,

    /// Emit JSON logs instead of the compact format
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Service signatures to resolve
    pub signatures: Vec<String>,
}

impl CliConfig {
    /// Loads the config file (if any) and applies command line overrides.
    pub fn to_naming_config(&self) -> Result<NamingConfig> {
        let mut config = match &self.config {
            Some(path) => NamingConfig::from_file(path)?,
            None => NamingConfig::default(),
        };

        if let Some(service_name) = &self.service_name {
            config.service_name = Some(service_name.clone());
        }
        if let Some(port_name) = &self.port_name {
            config.port_name = Some(port_name.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(status_filter) = &self.status_filter {
            config.status_filter = status_filter.clone();
        }
        if let Some(registry_url) = &self.registry_url {
            config.registry_url = registry_url.clone();
        }

        Ok(config)
    }
}
