use clap::Parser;
use plumber_catalog::core::ConfigProvider;
use plumber_catalog::utils::{logger, validation::Validate};
use plumber_catalog::{CatalogPipeline, CliConfig, EtlEngine, EtlError, LocalStorage, TomlConfig};

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<String, EtlError> {
    config.validate()?;
    tracing::debug!(
        "Inputs: contacts={} services={}",
        config.contacts_path(),
        config.services_path()
    );

    let storage = LocalStorage::new(".".to_string());
    let pipeline = CatalogPipeline::new(storage, config);
    EtlEngine::new(pipeline).run().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.json_logs);

    tracing::info!("Starting plumber-catalog");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let outcome = match config.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(toml_config) => run(toml_config).await,
                Err(e) => Err(e),
            }
        }
        None => run(config).await,
    };

    match outcome {
        Ok(output_path) => {
            println!("✅ Generated {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Catalog build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
