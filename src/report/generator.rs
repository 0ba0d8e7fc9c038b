//! Markdown and JSON report generation.
//!
//! This module renders a ranked [`Report`] as a Markdown document with a
//! leaderboard and per-seller top product tables, or as pretty JSON.

use crate::models::{Report, ReportMetadata, ReportRow, ReportSummary};
use anyhow::{Context, Result};
use std::path::Path;

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Sales Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_summary_section(&report.summary));
    output.push_str(&generate_leaderboard_section(&report.rows));
    output.push_str(&generate_top_products_section(&report.rows));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Sellers:** {}\n", metadata.sellers));
    section.push_str(&format!("- **Products:** {}\n", metadata.products));
    section.push_str(&format!(
        "- **Purchase Records:** {}\n",
        metadata.purchase_records
    ));
    section.push_str(&format!(
        "- **Duration:** {:.3}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the totals table.
fn generate_summary_section(summary: &ReportSummary) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Sellers | Sales | Revenue | Profit | Bonuses |\n");
    section.push_str("|:---:|:---:|---:|---:|---:|\n");
    section.push_str(&format!(
        "| {} | {} | {:.2} | {:.2} | {:.2} |\n\n",
        summary.sellers, summary.sales_count, summary.revenue, summary.profit, summary.bonus
    ));

    section
}

/// Generate the ranked seller table.
fn generate_leaderboard_section(rows: &[ReportRow]) -> String {
    let mut section = String::new();

    section.push_str("## Leaderboard\n\n");
    section.push_str("| Rank | Seller | ID | Sales | Revenue | Profit | Bonus |\n");
    section.push_str("|:---:|:---|:---|:---:|---:|---:|---:|\n");

    for (rank, row) in rows.iter().enumerate() {
        section.push_str(&format!(
            "| {} | {} | `{}` | {} | {:.2} | {:.2} | {:.2} |\n",
            rank + 1,
            row.name,
            row.seller_id,
            row.sales_count,
            row.revenue,
            row.profit,
            row.bonus
        ));
    }
    section.push('\n');

    section
}

/// Generate one top products table per seller.
fn generate_top_products_section(rows: &[ReportRow]) -> String {
    let mut section = String::new();

    section.push_str("## Top Products\n\n");

    for row in rows {
        section.push_str(&format!("### {} (`{}`)\n\n", row.name, row.seller_id));

        if row.top_products.is_empty() {
            section.push_str("*No sales recorded.*\n\n");
            continue;
        }

        section.push_str("| # | SKU | Quantity |\n");
        section.push_str("|:---:|:---|---:|\n");
        for (i, product) in row.top_products.iter().enumerate() {
            section.push_str(&format!(
                "| {} | `{}` | {} |\n",
                i + 1,
                product.sku,
                product.quantity
            ));
        }
        section.push('\n');
    }

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Report generated by seller-report v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Render the report in the given format.
pub fn render_report(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => generate_json_report(report),
        OutputFormat::Markdown => Ok(generate_markdown_report(report)),
    }
}

/// Render and write the report to a file.
pub fn write_report(report: &Report, format: OutputFormat, path: &Path) -> Result<()> {
    let content = render_report(report, format)?;

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
