//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and the mapping onto engine filter constraints.

use crate::analysis::filter::FilterConstraints;
use crate::models::Criticality;
use clap::Parser;
use std::path::PathBuf;

/// Nexusboard - portfolio analytics for package catalogs
///
/// Load a JSON package catalog, compute portfolio aggregates, grouped
/// projections, and rankings, and render a Markdown/JSON report. With
/// --ask, forward a question (plus a bounded dataset digest) to a local
/// Ollama model and print the answer.
///
/// Examples:
///   nexusboard --catalog catalog.json
///   nexusboard --catalog catalog.json --category Finance --min-complete 50
///   nexusboard --catalog catalog.json --format json --output report.json
///   nexusboard --catalog catalog.json --ask "Which vertical has the best ROI?"
///   nexusboard --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the JSON catalog file
    ///
    /// Falls back to the `[catalog] path` setting in .nexusboard.toml.
    #[arg(short = 'C', long, value_name = "FILE", env = "NEXUSBOARD_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Case-insensitive search over package name and description
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Restrict to one vertical ("All" matches everything)
    #[arg(long, value_name = "VERTICAL")]
    pub category: Option<String>,

    /// Restrict to one criticality level
    #[arg(long, value_name = "LEVEL")]
    pub criticality: Option<CriticalityLevel>,

    /// Lower completion bound (0-100)
    ///
    /// The bound pair is clamped so the range never narrows below 10.
    #[arg(long, default_value = "0", value_name = "PCT")]
    pub min_complete: u32,

    /// Upper completion bound (0-100)
    #[arg(long, default_value = "100", value_name = "PCT")]
    pub max_complete: u32,

    /// Ask the AI analyst a question instead of writing a report
    #[arg(short, long, value_name = "QUESTION")]
    pub ask: Option<String>,

    /// Ollama model used by --ask
    #[arg(
        short,
        long,
        default_value = "llama3.2:latest",
        env = "NEXUSBOARD_MODEL"
    )]
    pub model: String,

    /// Ollama API endpoint URL
    #[arg(long, default_value = "http://localhost:11434", env = "OLLAMA_URL")]
    pub ollama_url: String,

    /// Temperature for analyst responses (0.0 - 1.0)
    #[arg(long, default_value = "0.1")]
    pub temperature: f32,

    /// Request timeout in seconds for --ask
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .nexusboard.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .nexusboard.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Criticality level for --criticality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CriticalityLevel {
    High,
    Medium,
    Low,
}

impl From<CriticalityLevel> for Criticality {
    fn from(level: CriticalityLevel) -> Self {
        match level {
            CriticalityLevel::High => Criticality::High,
            CriticalityLevel::Medium => Criticality::Medium,
            CriticalityLevel::Low => Criticality::Low,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate temperature range
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err("Temperature must be between 0.0 and 1.0".to_string());
        }

        // Validate completion bounds (min > max is clamped, not an error)
        if self.min_complete > 100 || self.max_complete > 100 {
            return Err("Completion bounds must be between 0 and 100".to_string());
        }

        // Validate Ollama URL format when asking
        if self.ask.is_some()
            && !self.ollama_url.starts_with("http://")
            && !self.ollama_url.starts_with("https://")
        {
            return Err("Ollama URL must start with 'http://' or 'https://'".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Build the engine filter constraints from the filter flags.
    pub fn constraints(&self) -> FilterConstraints {
        let mut constraints = FilterConstraints::default();

        if let Some(ref search) = self.search {
            constraints.search = search.clone();
        }

        // "All" is the wildcard, matching the explorer UI convention.
        if let Some(ref category) = self.category {
            if !category.eq_ignore_ascii_case("all") {
                constraints.category = Some(category.clone());
            }
        }

        constraints.criticality = self.criticality.map(Criticality::from);

        constraints.set_min_complete(self.min_complete);
        constraints.set_max_complete(self.max_complete);

        constraints
    }
}
