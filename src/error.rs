//! Error types for sales analysis.

use thiserror::Error;

/// Errors that abort a sales analysis run.
///
/// There are no partial results: any of these stops the whole computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid input data: {0}")]
    InvalidInput(String),

    #[error("Missing strategy: {0}")]
    MissingStrategy(&'static str),

    #[error("Purchase record {record} references unknown seller '{seller_id}'")]
    UnknownSeller { seller_id: String, record: String },

    #[error("Purchase record {record} references unknown product sku '{sku}'")]
    UnknownProduct { sku: String, record: String },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
