use clap::Parser;
use plumber_catalog::adapters::spreadsheet::load_tables;
use plumber_catalog::config::InputArgs;
use plumber_catalog::core::SourceConfig;
use plumber_catalog::utils::{logger, validation::Validate};
use plumber_catalog::{EtlError, LocalStorage, MatchReport, TomlConfig};

#[derive(Parser)]
#[command(name = "match-report")]
#[command(about = "Compare company names between the contacts and services sheets")]
struct Args {
    #[command(flatten)]
    inputs: InputArgs,

    /// Load input settings from a TOML file instead of flags
    #[arg(long)]
    config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

async fn report<C: SourceConfig + Validate>(config: C) -> Result<MatchReport, EtlError> {
    config.validate()?;
    let storage = LocalStorage::new(".".to_string());
    let tables = load_tables(&storage, &config).await?;
    MatchReport::from_tables(
        &tables,
        config.contact_columns(),
        config.services_company_column(),
        config.header_scan_rows(),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose, false);

    let outcome = match args.config {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => report(config).await,
            Err(e) => Err(e),
        },
        None => report(args.inputs).await,
    };

    match outcome {
        Ok(report) => print!("{}", report),
        Err(e) => {
            tracing::error!("❌ Match report failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
