//! Precondition checks run once before aggregation.

use super::AnalysisOptions;
use crate::error::{AnalysisError, Result};
use crate::models::SalesData;
use crate::strategy::{BonusStrategy, RevenueStrategy};

/// Checks that every collection is non-empty and both strategies are present.
///
/// Collections are checked before strategies. On success, returns the two
/// strategies so callers don't have to unwrap them again.
pub fn validate_input<'a>(
    data: &SalesData,
    options: &AnalysisOptions<'a>,
) -> Result<(&'a dyn RevenueStrategy, &'a dyn BonusStrategy)> {
    require_non_empty("sellers", data.sellers.len())?;
    require_non_empty("products", data.products.len())?;
    require_non_empty("purchase_records", data.purchase_records.len())?;

    let revenue = options
        .calculate_revenue
        .ok_or(AnalysisError::MissingStrategy("calculate_revenue"))?;
    let bonus = options
        .calculate_bonus
        .ok_or(AnalysisError::MissingStrategy("calculate_bonus"))?;

    Ok((revenue, bonus))
}

fn require_non_empty(collection: &str, len: usize) -> Result<()> {
    if len == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "'{}' must be a non-empty list",
            collection
        )));
    }
    Ok(())
}
