//! Data models for the sales report.
//!
//! This module contains the input collections (sellers, products, purchase
//! records), the per-seller working accumulator used during aggregation, and
//! the report structures produced at the end.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A seller from the input collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// Unique seller identifier.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Hiring date, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Job title, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Seller {
    /// Returns the display name shown in the report.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A product card from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stock-keeping unit, unique per product.
    pub sku: String,
    /// Cost price of one unit.
    pub purchase_price: f64,
    /// Catalog sale price of one unit.
    pub sale_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One line of a purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub sku: String,
    pub quantity: u64,
    /// Unit price actually charged on this receipt.
    pub sale_price: f64,
    /// Discount percentage, 0 to 100.
    pub discount: f64,
}

/// A receipt: one sale by one seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub seller_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_discount: Option<f64>,
    /// Amount stated on the receipt; this is what counts towards revenue.
    pub total_amount: f64,
}

impl PurchaseRecord {
    /// Human-readable reference for error messages and logs.
    ///
    /// Uses the receipt id when present, otherwise the position in the input.
    pub fn reference(&self, index: usize) -> String {
        match self.receipt_id {
            Some(ref id) => id.clone(),
            None => format!("#{}", index),
        }
    }
}

/// The three input collections.
///
/// Missing collections deserialize as empty and are rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesData {
    #[serde(default)]
    pub sellers: Vec<Seller>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub purchase_records: Vec<PurchaseRecord>,
}

/// Running totals for one seller while purchase records are folded in.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerAccumulator {
    pub seller_id: String,
    pub name: String,
    pub revenue: f64,
    pub profit: f64,
    pub sales_count: u64,
    /// Cumulative quantity per sku, in first-sold order.
    pub products_sold: IndexMap<String, u64>,
}

impl SellerAccumulator {
    /// Creates a zeroed accumulator for a seller.
    pub fn new(seller: &Seller) -> Self {
        Self {
            seller_id: seller.id.clone(),
            name: seller.display_name(),
            revenue: 0.0,
            profit: 0.0,
            sales_count: 0,
            products_sold: IndexMap::new(),
        }
    }

    /// Adds sold units of a sku.
    pub fn record_units(&mut self, sku: &str, quantity: u64) {
        *self.products_sold.entry(sku.to_string()).or_insert(0) += quantity;
    }
}

/// A product in a seller's top list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub sku: String,
    pub quantity: u64,
}

/// One output row per seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub seller_id: String,
    pub name: String,
    pub revenue: f64,
    pub profit: f64,
    pub sales_count: u64,
    pub top_products: Vec<TopProduct>,
    pub bonus: f64,
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): revenue {:.2}, profit {:.2}, sales {}, bonus {:.2}",
            self.name, self.seller_id, self.revenue, self.profit, self.sales_count, self.bonus
        )
    }
}

/// Totals across all report rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub sellers: usize,
    pub sales_count: u64,
    pub revenue: f64,
    pub profit: f64,
    pub bonus: f64,
}

impl ReportSummary {
    /// Creates a summary from report rows.
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        let mut summary = Self::default();
        summary.sellers = rows.len();

        for row in rows {
            summary.sales_count += row.sales_count;
            summary.revenue += row.revenue;
            summary.profit += row.profit;
            summary.bonus += row.bonus;
        }

        summary.revenue = round_money(summary.revenue);
        summary.profit = round_money(summary.profit);
        summary.bonus = round_money(summary.bonus);

        summary
    }
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Where the input data came from (file path or description).
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    pub sellers: usize,
    pub products: usize,
    pub purchase_records: usize,
    /// Time spent loading and analyzing, in seconds.
    pub duration_seconds: f64,
}

/// The complete sales report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    /// Rows ranked by profit, best first.
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Assembles a report, deriving the summary from the rows.
    pub fn new(metadata: ReportMetadata, rows: Vec<ReportRow>) -> Self {
        Self {
            summary: ReportSummary::from_rows(&rows),
            metadata,
            rows,
        }
    }
}

/// Rounds a monetary amount to 2 decimals, halves away from zero.
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
