use analytics::SellerReport;
use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use rust_decimal::Decimal;

/// Renders the report as a terminal table, one row per seller in rank order.
pub fn render_table(reports: &[SellerReport]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Rank", "Seller", "Name", "Revenue", "Profit", "Sales", "Bonus", "Top product",
        ]);

    for (index, report) in reports.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&report.seller_id),
            Cell::new(&report.name),
            money(report.revenue),
            money(report.profit),
            Cell::new(report.sales_count).set_alignment(CellAlignment::Right),
            money(report.bonus),
            Cell::new(top_product(report)),
        ]);
    }

    table.to_string()
}

/// Renders the report as a pretty-printed JSON array.
pub fn render_json(reports: &[SellerReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("Failed to serialize report to JSON")
}

fn money(value: Decimal) -> Cell {
    Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right)
}

fn top_product(report: &SellerReport) -> String {
    report
        .top_products
        .first()
        .map(|product| format!("{} ×{}", product.sku, product.quantity))
        .unwrap_or_else(|| "-".to_string())
}
