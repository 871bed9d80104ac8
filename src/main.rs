use anyhow::Result;
use std::env;
use std::path::PathBuf;
use tracing::info;
use vehicle_passport_ocr::config::AppConfig;
use vehicle_passport_ocr::errors::error_logging;
use vehicle_passport_ocr::evaluation::{self, format_identifier};
use vehicle_passport_ocr::observability;
use vehicle_passport_ocr::PassportIdReader;

const USAGE: &str = "usage:
  vehicle-passport-ocr read <annotations.yaml|annotations.json>...
  vehicle-passport-ocr evaluate";

/// Load and validate configuration at startup
fn load_configuration() -> Result<AppConfig> {
    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    config.validate().map_err(|e| {
        error_logging::log_config_error(&e, "app_config", "validate");
        anyhow::anyhow!(
            "Configuration validation failed: {}. Please check your environment variables.",
            e
        )
    })?;

    Ok(config)
}

/// Print the identifier of each annotation file
fn run_read(config: &AppConfig, paths: &[PathBuf]) -> Result<()> {
    if paths.is_empty() {
        return Err(anyhow::anyhow!("No annotation files given.\n{}", USAGE));
    }

    for path in paths {
        let mut reader = PassportIdReader::new(config.reader.clone());
        reader.load_path(path)?;
        let id = reader.read_identifier()?;

        match id {
            Some(id) => println!("{}: {}", path.display(), format_identifier(&id)),
            None => println!("{}: not found", path.display()),
        }
    }
    Ok(())
}

/// Evaluate the reader against the configured ground truth
fn run_evaluate(config: &AppConfig) -> Result<()> {
    let report = evaluation::evaluate(&config.reader, &config.evaluation)?;

    for (idx, outcome) in report.outcomes.iter().enumerate() {
        println!("{} : {}", idx, outcome.document);
        println!(
            "    id: {} ::: correct_id: {} ::: id match: {}",
            outcome.predicted.as_deref().unwrap_or("None"),
            outcome.expected.as_deref().unwrap_or("None"),
            outcome.matched
        );
    }
    println!("id reading accuracy: {} %", report.accuracy());
    Ok(())
}

fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    let config = load_configuration()?;
    observability::init_tracing_with_config(&config.observability)?;
    info!(summary = %config.summary(), "Configuration loaded");

    let args: Vec<String> = env::args().skip(1).collect();
    match args.split_first() {
        Some((command, rest)) if command == "read" => {
            let paths: Vec<PathBuf> = rest.iter().map(PathBuf::from).collect();
            run_read(&config, &paths)
        }
        Some((command, _)) if command == "evaluate" => run_evaluate(&config),
        _ => Err(anyhow::anyhow!("{}", USAGE)),
    }
}
