//! seller-report - per-seller sales report CLI
//!
//! Loads sellers, products and purchase records from a JSON file, ranks
//! sellers by profit with the reference revenue and bonus rules, and writes
//! a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (bad arguments, unreadable input, invalid data, etc.)

use anyhow::{Context, Result};
use chrono::Utc;
use seller_report::cli::Args;
use seller_report::config::{Config, DEFAULT_CONFIG_FILE};
use seller_report::models::{Report, ReportMetadata};
use seller_report::report;
use seller_report::{analyze_sales_data, loader, AnalysisOptions, BonusByProfit, SimpleRevenue};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    init_logging(&args);

    info!("seller-report v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_report(&args) {
        error!("Report failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .sellerreport.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to customize the output, top product count and bonus rates.");
    Ok(())
}

/// Initialize logging based on verbosity settings and `RUST_LOG`.
fn init_logging(args: &Args) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(args.log_filter(rust_log.as_deref())).unwrap_or_else(|e| {
        eprintln!("Warning: ignoring invalid RUST_LOG: {}", e);
        EnvFilter::new(args.log_level().as_str().to_lowercase())
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

/// Load the data, run the analysis and emit the report.
fn run_report(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let input = args
        .input
        .as_deref()
        .context("No input file given (use --input)")?;

    info!("Loading sales data from {}", input.display());
    let data = loader::load_sales_data(input)?;

    let revenue = SimpleRevenue;
    let bonus = BonusByProfit::new(config.bonus);
    let options = AnalysisOptions::new(&revenue, &bonus)
        .with_top_products_limit(config.analysis.top_products);

    let rows = analyze_sales_data(&data, &options)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    let metadata = ReportMetadata {
        source: input.display().to_string(),
        generated_at: Utc::now(),
        sellers: data.sellers.len(),
        products: data.products.len(),
        purchase_records: data.purchase_records.len(),
        duration_seconds: start_time.elapsed().as_secs_f64(),
    };
    let report = Report::new(metadata, rows);

    if args.stdout {
        print!("{}", report::render_report(&report, config.general.format)?);
        return Ok(());
    }

    let output = PathBuf::from(&config.general.output);
    report::write_report(&report, config.general.format, &output)?;

    if !args.quiet {
        print_summary(&report, &output);
    }

    Ok(())
}

fn print_summary(report: &Report, output: &Path) {
    let summary = &report.summary;

    println!("\n📊 Sales Summary:");
    println!("   Sellers: {}", summary.sellers);
    println!("   Sales: {}", summary.sales_count);
    println!("   Revenue: {:.2}", summary.revenue);
    println!("   Profit: {:.2}", summary.profit);
    println!("   Bonuses: {:.2}", summary.bonus);

    if let Some(best) = report.rows.first() {
        println!("   🏆 Top seller: {}", best);
    }

    println!("\n✅ Report saved to: {}", output.display());
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
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
