//! Ranking sellers by profit and projecting report rows.

use crate::models::{round_money, ReportRow, SellerAccumulator, TopProduct};
use crate::strategy::BonusStrategy;
use tracing::debug;

/// Sorts accumulators by profit (highest first) and builds the report rows.
///
/// The sort is stable, so sellers with equal profit keep their input order.
/// A NaN profit ranks below every number. Bonuses see the unrounded
/// accumulator; rounding happens on projection.
pub fn rank_and_project(
    mut accumulators: Vec<SellerAccumulator>,
    bonus_strategy: &dyn BonusStrategy,
    top_products_limit: usize,
) -> Vec<ReportRow> {
    accumulators.sort_by(|a, b| profit_key(b.profit).total_cmp(&profit_key(a.profit)));

    let total = accumulators.len();

    accumulators
        .into_iter()
        .enumerate()
        .map(|(rank, seller)| {
            let bonus = bonus_strategy.bonus(rank, total, &seller);
            debug!(
                "Rank {}: {} profit {:.2} bonus {:.2}",
                rank, seller.seller_id, seller.profit, bonus
            );

            ReportRow {
                top_products: top_products(&seller, top_products_limit),
                revenue: round_money(seller.revenue),
                profit: round_money(seller.profit),
                sales_count: seller.sales_count,
                bonus: round_money(bonus),
                seller_id: seller.seller_id,
                name: seller.name,
            }
        })
        .collect()
}

// NaN sinks to the bottom and -0.0 ties with 0.0, so total_cmp stays stable
// for equal profits.
fn profit_key(profit: f64) -> f64 {
    if profit.is_nan() {
        f64::NEG_INFINITY
    } else if profit == 0.0 {
        0.0
    } else {
        profit
    }
}

/// Returns up to `limit` skus by quantity sold, highest first.
///
/// Equal quantities keep the order in which the skus were first sold.
pub fn top_products(seller: &SellerAccumulator, limit: usize) -> Vec<TopProduct> {
    let mut products: Vec<TopProduct> = seller
        .products_sold
        .iter()
        .map(|(sku, quantity)| TopProduct {
            sku: sku.clone(),
            quantity: *quantity,
        })
        .collect();

    products.sort_by_key(|p| std::cmp::Reverse(p.quantity));
    products.truncate(limit);

    products
}
