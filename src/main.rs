use bns_naming::utils::error::ErrorCategory;
use bns_naming::utils::logger;
use bns_naming::{BnsNamingService, CliConfig, HttpRegistryClient, NamingError, NamingService};
use clap::Parser;
use std::collections::HashSet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match run(&cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Resolution failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.category() {
                ErrorCategory::Configuration | ErrorCategory::Lifecycle => 1,
                ErrorCategory::Registry => 2,
                ErrorCategory::System => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<(), NamingError> {
    let config = cli.to_naming_config()?;
    if cli.verbose {
        tracing::debug!("Naming config: {:?}", config);
    }

    let client = HttpRegistryClient::new(config.registry_url.clone())?;
    let service = BnsNamingService::from_config(client, &config)?;
    tracing::info!(
        "Resolving {} signature(s) via '{}'",
        cli.signatures.len(),
        service.service_name()
    );

    let signatures: HashSet<String> = cli.signatures.iter().cloned().collect();
    let resolved = service.list(&signatures).await?;

    if service.parse_fallbacks() > 0 {
        tracing::warn!(
            "{} malformed registry value(s) were replaced by 0",
            service.parse_fallbacks()
        );
    }

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
