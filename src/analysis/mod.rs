//! Sales analysis pipeline.
//!
//! Validation, index construction, the fold over purchase records, and the
//! ranking pass that turns accumulators into report rows.

pub mod aggregator;
pub mod index;
pub mod ranking;
pub mod validator;

pub use aggregator::*;
pub use index::{build_product_index, build_seller_index};
pub use ranking::{rank_and_project, top_products};
pub use validator::validate_input;

use crate::error::Result;
use crate::models::{ReportRow, SalesData};
use crate::strategy::{BonusStrategy, RevenueStrategy};
use tracing::{debug, info};

/// Default length of each seller's top product list.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Injected behaviors and tuning for one analysis run.
///
/// Strategies are optional so that an incomplete set of options is reported
/// as [`crate::AnalysisError::MissingStrategy`] instead of failing to build.
#[derive(Clone, Copy)]
pub struct AnalysisOptions<'a> {
    pub calculate_revenue: Option<&'a dyn RevenueStrategy>,
    pub calculate_bonus: Option<&'a dyn BonusStrategy>,
    /// Maximum entries in each row's `top_products`.
    pub top_products_limit: usize,
}

impl<'a> AnalysisOptions<'a> {
    /// Options with both strategies set and the default top product limit.
    pub fn new(revenue: &'a dyn RevenueStrategy, bonus: &'a dyn BonusStrategy) -> Self {
        Self {
            calculate_revenue: Some(revenue),
            calculate_bonus: Some(bonus),
            top_products_limit: TOP_PRODUCTS_LIMIT,
        }
    }

    /// Overrides the top product limit.
    pub fn with_top_products_limit(mut self, limit: usize) -> Self {
        self.top_products_limit = limit;
        self
    }
}

impl Default for AnalysisOptions<'_> {
    fn default() -> Self {
        Self {
            calculate_revenue: None,
            calculate_bonus: None,
            top_products_limit: TOP_PRODUCTS_LIMIT,
        }
    }
}

/// Computes the per-seller report rows, ranked by profit (best first).
///
/// Fails before aggregating anything if the input or options are invalid,
/// and aborts the whole run on the first record that references an unknown
/// seller or sku.
pub fn analyze_sales_data(
    data: &SalesData,
    options: &AnalysisOptions<'_>,
) -> Result<Vec<ReportRow>> {
    let (revenue_strategy, bonus_strategy) = validate_input(data, options)?;

    info!(
        "Analyzing {} purchase records for {} sellers ({} products)",
        data.purchase_records.len(),
        data.sellers.len(),
        data.products.len()
    );

    let mut sellers = build_seller_index(&data.sellers);
    let products = build_product_index(&data.products);
    debug!(
        "Indexed {} sellers and {} products",
        sellers.len(),
        products.len()
    );

    fold_purchase_records(
        &mut sellers,
        &products,
        &data.purchase_records,
        revenue_strategy,
    )?;

    let accumulators = sellers.into_values().collect();
    let rows = rank_and_project(accumulators, bonus_strategy, options.top_products_limit);

    info!("Ranked {} sellers by profit", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::models::{Item, Product, PurchaseRecord, Seller};
    use crate::strategy::{BonusByProfit, SimpleRevenue};
    use std::collections::HashMap;

    fn seller(id: &str) -> Seller {
        Seller {
            id: id.to_string(),
            first_name: "First".to_string(),
            last_name: id.to_uppercase(),
            start_date: None,
            position: None,
        }
    }

    fn product(sku: &str, purchase_price: f64, sale_price: f64) -> Product {
        Product {
            sku: sku.to_string(),
            purchase_price,
            sale_price,
            name: None,
            category: None,
        }
    }

    fn item(sku: &str, quantity: u64, sale_price: f64, discount: f64) -> Item {
        Item {
            sku: sku.to_string(),
            quantity,
            sale_price,
            discount,
        }
    }

    fn record(seller_id: &str, total_amount: f64, items: Vec<Item>) -> PurchaseRecord {
        PurchaseRecord {
            receipt_id: None,
            date: None,
            seller_id: seller_id.to_string(),
            customer_id: None,
            items,
            total_discount: None,
            total_amount,
        }
    }

    fn has_two_decimals(value: f64) -> bool {
        ((value * 100.0).round() - value * 100.0).abs() < 1e-6
    }

    /// Three sellers whose profits come out at 300, 200 and 100.
    fn three_seller_data() -> SalesData {
        SalesData {
            sellers: vec![seller("low"), seller("high"), seller("mid")],
            products: vec![product("A", 0.0, 10.0)],
            purchase_records: vec![
                record("low", 100.0, vec![item("A", 10, 10.0, 0.0)]),
                record("high", 300.0, vec![item("A", 30, 10.0, 0.0)]),
                record("mid", 200.0, vec![item("A", 20, 10.0, 0.0)]),
            ],
        }
    }

    /// A mixed dataset with discounts, several skus and uneven sellers.
    fn mixed_data() -> SalesData {
        let skus = [
            "S01", "S02", "S03", "S04", "S05", "S06", "S07", "S08", "S09", "S10", "S11", "S12",
        ];
        let products = skus
            .iter()
            .enumerate()
            .map(|(i, sku)| product(sku, 3.0 + i as f64, 7.5 + i as f64 * 1.3))
            .collect();

        let mut purchase_records = Vec::new();
        for (n, seller_id) in ["s1", "s2", "s3", "s4", "s1", "s3", "s1", "s5"].iter().enumerate() {
            let items = skus
                .iter()
                .enumerate()
                .filter(|(i, _)| (i + n) % 3 != 0)
                .map(|(i, sku)| item(sku, (i + n) as u64 % 4 + 1, 9.99 + i as f64, (n * 7 % 30) as f64))
                .collect::<Vec<_>>();
            let total = items.iter().map(|it| it.sale_price * it.quantity as f64).sum();
            purchase_records.push(record(seller_id, total, items));
        }

        SalesData {
            sellers: ["s1", "s2", "s3", "s4", "s5"].iter().map(|id| seller(id)).collect(),
            products,
            purchase_records,
        }
    }

    fn run(data: &SalesData) -> Result<Vec<ReportRow>> {
        let revenue = SimpleRevenue;
        let bonus = BonusByProfit::default();
        analyze_sales_data(data, &AnalysisOptions::new(&revenue, &bonus))
    }

    #[test]
    fn test_single_seller_end_to_end() {
        let data = SalesData {
            sellers: vec![seller("seller_1")],
            products: vec![product("A", 10.0, 20.0)],
            purchase_records: vec![record("seller_1", 20.0, vec![item("A", 2, 20.0, 0.0)])],
        };

        let rows = run(&data).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.seller_id, "seller_1");
        assert_eq!(row.name, "First SELLER_1");
        assert_eq!(row.revenue, 20.0);
        assert_eq!(row.profit, 20.0);
        assert_eq!(row.sales_count, 1);
        assert_eq!(row.bonus, 3.0);
        assert_eq!(row.top_products.len(), 1);
        assert_eq!(row.top_products[0].sku, "A");
        assert_eq!(row.top_products[0].quantity, 2);
    }

    #[test]
    fn test_three_seller_bonus_tiers() {
        let rows = run(&three_seller_data()).unwrap();

        let ids: Vec<_> = rows.iter().map(|r| r.seller_id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);

        let profits: Vec<_> = rows.iter().map(|r| r.profit).collect();
        assert_eq!(profits, vec![300.0, 200.0, 100.0]);

        assert_eq!(rows[0].bonus, 45.0);
        assert_eq!(rows[1].bonus, 20.0);
        // Third place is checked before last place.
        assert_eq!(rows[2].bonus, 10.0);
    }

    #[test]
    fn test_empty_collections_are_invalid() {
        let mut data = three_seller_data();
        data.sellers.clear();
        assert!(matches!(run(&data), Err(AnalysisError::InvalidInput(_))));

        let mut data = three_seller_data();
        data.products.clear();
        assert!(matches!(run(&data), Err(AnalysisError::InvalidInput(_))));

        let mut data = three_seller_data();
        data.purchase_records.clear();
        assert!(matches!(run(&data), Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_strategies() {
        let data = three_seller_data();
        let revenue = SimpleRevenue;
        let bonus = BonusByProfit::default();

        let options = AnalysisOptions {
            calculate_revenue: None,
            ..AnalysisOptions::new(&revenue, &bonus)
        };
        assert_eq!(
            analyze_sales_data(&data, &options),
            Err(AnalysisError::MissingStrategy("calculate_revenue"))
        );

        let options = AnalysisOptions {
            calculate_bonus: None,
            ..AnalysisOptions::new(&revenue, &bonus)
        };
        assert_eq!(
            analyze_sales_data(&data, &options),
            Err(AnalysisError::MissingStrategy("calculate_bonus"))
        );
    }

    #[test]
    fn test_unknown_seller_aborts() {
        let mut data = three_seller_data();
        data.purchase_records.push(record("ghost", 1.0, Vec::new()));

        match run(&data) {
            Err(AnalysisError::UnknownSeller { seller_id, record }) => {
                assert_eq!(seller_id, "ghost");
                assert_eq!(record, "#3");
            }
            other => panic!("expected UnknownSeller, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_sku_aborts() {
        let mut data = three_seller_data();
        data.purchase_records[1].items.push(item("ZZZ", 1, 1.0, 0.0));

        assert!(matches!(
            run(&data),
            Err(AnalysisError::UnknownProduct { ref sku, .. }) if sku == "ZZZ"
        ));
    }

    #[test]
    fn test_injected_strategies_are_used() {
        let data = three_seller_data();
        let revenue = |item: &Item, _: &Product| item.quantity as f64;
        let bonus = |rank: usize, total: usize, _: &crate::models::SellerAccumulator| {
            (total - rank) as f64
        };

        let rows = analyze_sales_data(&data, &AnalysisOptions::new(&revenue, &bonus)).unwrap();

        let bonuses: Vec<_> = rows.iter().map(|r| r.bonus).collect();
        assert_eq!(bonuses, vec![3.0, 2.0, 1.0]);
        assert_eq!(rows[0].profit, 30.0);
    }

    #[test]
    fn test_nan_revenue_strategy_does_not_break_ranking() {
        let ids: Vec<String> = (0..40).map(|i| format!("s{:02}", i)).collect();
        let data = SalesData {
            sellers: ids.iter().map(|id| seller(id)).collect(),
            products: vec![product("A", 0.0, 1.0), product("N", 0.0, 1.0)],
            purchase_records: ids
                .iter()
                .enumerate()
                .map(|(i, id)| {
                    let sku = if i % 5 == 0 { "N" } else { "A" };
                    record(id, 1.0, vec![item(sku, i as u64 + 1, 1.0, 0.0)])
                })
                .collect(),
        };
        let revenue = |item: &Item, _: &Product| {
            if item.sku == "N" {
                f64::NAN
            } else {
                item.quantity as f64
            }
        };
        let bonus = BonusByProfit::default();

        let rows = analyze_sales_data(&data, &AnalysisOptions::new(&revenue, &bonus)).unwrap();

        assert_eq!(rows.len(), 40);
        assert_eq!(rows[0].seller_id, "s39");
        assert!(rows[..32].iter().all(|r| !r.profit.is_nan()));
        assert!(rows[32..].iter().all(|r| r.profit.is_nan()));
    }

    #[test]
    fn test_sales_count_matches_record_count() {
        let data = mixed_data();
        let rows = run(&data).unwrap();

        let total: u64 = rows.iter().map(|r| r.sales_count).sum();
        assert_eq!(total, data.purchase_records.len() as u64);
        assert_eq!(rows.len(), data.sellers.len());
    }

    #[test]
    fn test_products_sold_matches_item_quantities() {
        let data = mixed_data();
        let revenue = SimpleRevenue;
        let mut sellers = build_seller_index(&data.sellers);
        let products = build_product_index(&data.products);
        fold_purchase_records(&mut sellers, &products, &data.purchase_records, &revenue).unwrap();

        let mut expected: HashMap<&str, u64> = HashMap::new();
        for rec in &data.purchase_records {
            for it in &rec.items {
                *expected.entry(it.sku.as_str()).or_default() += it.quantity;
            }
        }

        let mut actual: HashMap<&str, u64> = HashMap::new();
        for acc in sellers.values() {
            for (sku, qty) in &acc.products_sold {
                *actual.entry(sku.as_str()).or_default() += qty;
            }
        }

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_rows_are_sorted_and_rounded() {
        let rows = run(&mixed_data()).unwrap();

        for pair in rows.windows(2) {
            assert!(pair[0].profit >= pair[1].profit);
        }

        for row in &rows {
            assert!(row.top_products.len() <= TOP_PRODUCTS_LIMIT);
            for pair in row.top_products.windows(2) {
                assert!(pair[0].quantity >= pair[1].quantity);
            }
            assert!(has_two_decimals(row.revenue), "revenue {}", row.revenue);
            assert!(has_two_decimals(row.profit), "profit {}", row.profit);
            assert!(has_two_decimals(row.bonus), "bonus {}", row.bonus);
        }
    }

    #[test]
    fn test_top_products_limit_option() {
        let revenue = SimpleRevenue;
        let bonus = BonusByProfit::default();
        let options = AnalysisOptions::new(&revenue, &bonus).with_top_products_limit(3);

        let rows = analyze_sales_data(&mixed_data(), &options).unwrap();
        assert!(rows.iter().all(|r| r.top_products.len() <= 3));
        assert!(rows.iter().any(|r| r.top_products.len() == 3));
    }

    #[test]
    fn test_seller_without_sales_is_reported() {
        let mut data = three_seller_data();
        data.sellers.push(seller("idle"));

        let rows = run(&data).unwrap();
        let idle = rows.iter().find(|r| r.seller_id == "idle").unwrap();
        assert_eq!(idle.sales_count, 0);
        assert_eq!(idle.revenue, 0.0);
        assert!(idle.top_products.is_empty());
        assert_eq!(rows.last().map(|r| r.seller_id.as_str()), Some("idle"));
    }
}
