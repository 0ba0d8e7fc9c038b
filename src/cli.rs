//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::report::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// seller-report - per-seller sales report with rank-based bonuses
///
/// Reads sellers, products and purchase records from a JSON file, ranks
/// sellers by profit and writes a Markdown or JSON report.
///
/// Examples:
///   seller-report --input data.json
///   seller-report --input data.json --format json --output report.json
///   seller-report --input data.json --top-products 5 --stdout
///   seller-report --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// JSON file with `sellers`, `products` and `purchase_records`
    #[arg(short, long, value_name = "FILE", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to `sales_report.md` or the value in the config file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .sellerreport.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "SELLER_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum number of products listed per seller
    #[arg(long, value_name = "COUNT")]
    pub top_products: Option<usize>,

    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .sellerreport.toml configuration file
    #[arg(long)]
    pub init_config: bool,
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

        if let Some(ref input) = self.input {
            if !input.is_file() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        }

        if self.top_products == Some(0) {
            return Err("Top products must be at least 1".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.stdout && self.output.is_some() {
            return Err("Cannot use both --stdout and --output".to_string());
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

    /// Returns the log filter directive.
    ///
    /// `-v` and `-q` win over `RUST_LOG`; without either flag a non-empty
    /// `RUST_LOG` value is used as-is.
    pub fn log_filter(&self, rust_log: Option<&str>) -> String {
        match rust_log.map(str::trim) {
            Some(directive) if !directive.is_empty() && !self.verbose && !self.quiet => {
                directive.to_string()
            }
            _ => self.log_level().as_str().to_lowercase(),
        }
    }
}
