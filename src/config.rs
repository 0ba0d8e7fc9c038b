//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.sellerreport.toml` files.

use crate::analysis::TOP_PRODUCTS_LIMIT;
use crate::report::OutputFormat;
use crate::strategy::BonusRates;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".sellerreport.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Aggregation settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Bonus tier rates.
    #[serde(default)]
    pub bonus: BonusRates,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Default report format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: OutputFormat::default(),
        }
    }
}

fn default_output() -> String {
    "sales_report.md".to_string()
}

/// Aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Maximum products listed per seller.
    #[serde(default = "default_top_products")]
    pub top_products: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_products: default_top_products(),
        }
    }
}

fn default_top_products() -> usize {
    TOP_PRODUCTS_LIMIT
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check value ranges that serde can't express.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.top_products == 0 {
            bail!("analysis.top_products must be at least 1");
        }

        let rates = [
            ("first", self.bonus.first),
            ("runner_up", self.bonus.runner_up),
            ("last", self.bonus.last),
            ("other", self.bonus.other),
        ];
        for (name, rate) in rates {
            if !rate.is_finite() || rate < 0.0 {
                bail!("bonus.{} must be a non-negative number, got {}", name, rate);
            }
        }

        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        if let Some(format) = args.format {
            self.general.format = format;
        }

        if let Some(top_products) = args.top_products {
            self.analysis.top_products = top_products;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
