//! seller-report - per-seller sales analysis.
//!
//! Folds purchase records into per-seller totals (revenue, profit, sales
//! count, units per sku), ranks sellers by profit and assigns a rank-based
//! bonus. Revenue and bonus rules are injected through [`RevenueStrategy`]
//! and [`BonusStrategy`].
//!
//! ```no_run
//! use seller_report::{analyze_sales_data, AnalysisOptions, BonusByProfit, SimpleRevenue};
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = seller_report::loader::load_sales_data("data.json".as_ref())?;
//! let revenue = SimpleRevenue;
//! let bonus = BonusByProfit::default();
//! for row in analyze_sales_data(&data, &AnalysisOptions::new(&revenue, &bonus))? {
//!     println!("{}", row);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod strategy;

pub use analysis::{analyze_sales_data, AnalysisOptions, TOP_PRODUCTS_LIMIT};
pub use error::AnalysisError;
pub use models::{
    Item, Product, PurchaseRecord, Report, ReportMetadata, ReportRow, ReportSummary, SalesData,
    Seller, SellerAccumulator, TopProduct,
};
pub use strategy::{BonusByProfit, BonusRates, BonusStrategy, RevenueStrategy, SimpleRevenue};
