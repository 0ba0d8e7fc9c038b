//! Loading sales data from JSON.
//!
//! The input document is an object with `sellers`, `products` and
//! `purchase_records` arrays. A collection that is present but not an array
//! is rejected as invalid input rather than as a generic parse error.

use crate::error::AnalysisError;
use crate::models::SalesData;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

const COLLECTIONS: [&str; 3] = ["sellers", "products", "purchase_records"];

/// Load sales data from a JSON file.
pub fn load_sales_data(path: &Path) -> Result<SalesData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;

    parse_sales_data(&content)
        .with_context(|| format!("Failed to load sales data from {}", path.display()))
}

/// Parse sales data from a JSON string.
pub fn parse_sales_data(content: &str) -> Result<SalesData> {
    let document: Value = serde_json::from_str(content).context("Input is not valid JSON")?;

    let object = document.as_object().ok_or_else(|| {
        AnalysisError::InvalidInput("top-level value must be an object".to_string())
    })?;

    for name in COLLECTIONS {
        match object.get(name) {
            Some(Value::Array(_)) | None => {}
            Some(_) => {
                return Err(AnalysisError::InvalidInput(format!("'{}' must be a list", name)).into())
            }
        }
    }

    let data: SalesData =
        serde_json::from_value(document).context("Input does not match the sales data shape")?;

    debug!(
        "Loaded {} sellers, {} products, {} purchase records",
        data.sellers.len(),
        data.products.len(),
        data.purchase_records.len()
    );

    Ok(data)
}
