//! Nexusboard - portfolio analytics for package catalogs
//!
//! A CLI tool that loads a JSON catalog of software packages, runs the
//! portfolio aggregation engine over it, and renders Markdown/JSON
//! reports. With --ask, a bounded dataset digest plus the user's
//! question is forwarded to a local Ollama model.
//!
//! Exit codes:
//!   0 - Success (including an analyst call answered with a fallback)
//!   1 - Runtime error (bad arguments, unreadable catalog, write failure)

mod analysis;
mod analyst;
mod catalog;
mod cli;
mod config;
mod models;
mod report;

use analyst::{AnalystClient, AnalystConfig};
use anyhow::{Context, Result};
use catalog::Catalog;
use cli::{Args, OutputFormat};
use config::Config;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Message shown when the analyst call fails (the failure itself only
/// reaches the log).
const ANALYST_FALLBACK: &str = "Sorry, I encountered an error connecting to the AI service.";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Nexusboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .nexusboard.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".nexusboard.toml");

    if path.exists() {
        eprintln!("⚠️  .nexusboard.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .nexusboard.toml")?;

    println!("✅ Created .nexusboard.toml with default settings.");
    println!("   Edit it to set the catalog path, model, and output file.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete workflow: load, compute, report or ask.
async fn run(args: Args) -> Result<()> {
    // Load configuration and apply CLI overrides
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Load the catalog
    let catalog_path = config
        .catalog
        .path
        .clone()
        .context("No catalog file given (use --catalog or set [catalog] path in .nexusboard.toml)")?;

    println!("📦 Loading catalog: {}", catalog_path.display());
    let catalog = Catalog::load(&catalog_path)?;
    println!(
        "   {} packages across {} verticals",
        catalog.len(),
        catalog.verticals().len()
    );

    // Ask mode: compose context and query the analyst
    if let Some(ref question) = args.ask {
        return ask_analyst(&catalog, &config, question).await;
    }

    // Report mode: filter, compute, render, write
    let constraints = args.constraints();
    if constraints.is_active() {
        debug!("Active filter constraints: {:?}", constraints);
    }

    let portfolio = report::build_report(
        &catalog,
        &catalog_path.display().to_string(),
        &constraints,
    );

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&portfolio)?,
        OutputFormat::Markdown => report::generate_markdown_report(&portfolio),
    };

    let output_path = PathBuf::from(&config.general.output);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    // Print summary
    println!("\n📊 Portfolio Summary:");
    println!(
        "   Selected: {} of {} packages",
        portfolio.metadata.selected_packages, portfolio.metadata.total_packages
    );
    println!(
        "   Total value: ${:.0} | Avg completion: {:.0}% | Ready: {}",
        portfolio.totals.total_value, portfolio.totals.avg_completion, portfolio.totals.ready_count
    );
    println!("\n✅ Report saved to: {}", output_path.display());

    Ok(())
}

/// Compose the dataset digest and forward the question to the analyst.
///
/// The analyst context is always composed from the full catalog; an
/// unreachable model surfaces as a fallback message, not a failure.
async fn ask_analyst(catalog: &Catalog, config: &Config, question: &str) -> Result<()> {
    let records = catalog.packages();

    let totals = analysis::aggregate(records);
    let profiles = analysis::normalize(&analysis::group_by_vertical(records));
    let tiers = analysis::group_by_tier(records);
    let context = analyst::context::compose(&totals, &profiles, &tiers, records);

    let analyst_config = AnalystConfig {
        ollama_url: config.model.ollama_url.clone(),
        model_name: config.model.name.clone(),
        temperature: config.model.temperature,
        timeout_seconds: config.model.timeout_seconds,
    };

    println!("\n🤖 Asking analyst ({})...", analyst_config.model_name);
    let client = AnalystClient::new(analyst_config)?;

    match client.ask(&context, question).await {
        Ok(answer) => {
            println!("\n💬 {}", answer.trim());
        }
        Err(e) => {
            warn!("Analyst call failed: {}", e);
            println!("\n💬 {}", ANALYST_FALLBACK);
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .nexusboard.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
