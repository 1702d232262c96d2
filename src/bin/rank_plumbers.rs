use clap::Parser;
use plumber_catalog::core::ranking::{assess, rank_for_job, Severity};
use plumber_catalog::core::Storage;
use plumber_catalog::domain::services::resolve_service_code;
use plumber_catalog::utils::logger;
use plumber_catalog::{ContactRecord, EtlError, LocalStorage, ServiceCode};

#[derive(Parser)]
#[command(name = "rank-plumbers")]
#[command(about = "Rank catalog plumbers for a job by required services and urgency")]
struct Args {
    /// Required service codes; diagnostic aliases such as PIPE_REPAIR are accepted
    #[arg(required = true)]
    services: Vec<String>,

    #[arg(long, default_value = "NON_EMERGENCY")]
    severity: Severity,

    /// Catalog generated by plumber-catalog
    #[arg(long, default_value = "data/plumbers.json")]
    catalog: String,

    /// Print why each plumber was included or excluded
    #[arg(long)]
    explain: bool,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

fn resolve_all(codes: &[String]) -> Result<Vec<ServiceCode>, EtlError> {
    codes
        .iter()
        .map(|code| {
            resolve_service_code(code).ok_or_else(|| EtlError::InvalidConfigValueError {
                field: "services".to_string(),
                value: code.clone(),
                reason: "Unknown service code or alias".to_string(),
            })
        })
        .collect()
}

async fn load_catalog(path: &str) -> Result<Vec<ContactRecord>, EtlError> {
    let storage = LocalStorage::new(".".to_string());
    let data = storage.read_file(path).await?;
    Ok(serde_json::from_slice(&data)?)
}

async fn run(args: &Args) -> Result<(), EtlError> {
    let required = resolve_all(&args.services)?;
    let catalog = load_catalog(&args.catalog).await?;
    tracing::debug!("Loaded {} plumbers from {}", catalog.len(), args.catalog);

    let ranked = rank_for_job(&catalog, &required, args.severity);
    println!(
        "{} plumbers match {} ({})",
        ranked.len(),
        required
            .iter()
            .map(ServiceCode::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        args.severity
    );
    for (position, entry) in ranked.iter().enumerate() {
        println!(
            "{:>3}. {} [score {}] {}",
            position + 1,
            entry.contact.name,
            entry.score,
            entry.contact.phone.as_deref().unwrap_or("-")
        );
    }

    if args.explain {
        println!();
        for contact in &catalog {
            let assessment = assess(contact, &required, args.severity);
            println!("{}: {}", contact.name, assessment.reason);
            if !assessment.missing.is_empty() {
                let missing: Vec<&str> = assessment.missing.iter().map(ServiceCode::as_str).collect();
                println!("    missing: {}", missing.join(", "));
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose, false);

    if let Err(e) = run(&args).await {
        tracing::error!("❌ Ranking failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}
