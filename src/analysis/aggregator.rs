//! Folding purchase records into per-seller accumulators.

use crate::error::{AnalysisError, Result};
use crate::models::{Product, PurchaseRecord, SellerAccumulator};
use crate::strategy::RevenueStrategy;
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::trace;

/// Applies every purchase record to its seller's accumulator.
///
/// Per record: one more sale and the stated total added to revenue. Per line
/// item: `revenue - cost` added to profit and the quantity added to the
/// seller's sku counter. Stops at the first unknown seller or sku.
pub fn fold_purchase_records(
    sellers: &mut IndexMap<String, SellerAccumulator>,
    products: &HashMap<&str, &Product>,
    records: &[PurchaseRecord],
    revenue_strategy: &dyn RevenueStrategy,
) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        let seller = sellers
            .get_mut(record.seller_id.as_str())
            .ok_or_else(|| AnalysisError::UnknownSeller {
                seller_id: record.seller_id.clone(),
                record: record.reference(index),
            })?;

        apply_record(seller, products, record, index, revenue_strategy)?;
    }

    Ok(())
}

/// Folds a single record into one accumulator.
pub fn apply_record(
    seller: &mut SellerAccumulator,
    products: &HashMap<&str, &Product>,
    record: &PurchaseRecord,
    index: usize,
    revenue_strategy: &dyn RevenueStrategy,
) -> Result<()> {
    seller.sales_count += 1;
    seller.revenue += record.total_amount;

    for item in &record.items {
        let product = products
            .get(item.sku.as_str())
            .ok_or_else(|| AnalysisError::UnknownProduct {
                sku: item.sku.clone(),
                record: record.reference(index),
            })?;

        let cost = product.purchase_price * item.quantity as f64;
        let revenue = revenue_strategy.revenue(item, product);
        seller.profit += revenue - cost;
        seller.record_units(&item.sku, item.quantity);

        trace!(
            "{}: {} x{} revenue {:.2} cost {:.2}",
            seller.seller_id,
            item.sku,
            item.quantity,
            revenue,
            cost
        );
    }

    Ok(())
}
