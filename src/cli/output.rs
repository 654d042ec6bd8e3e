use super::ui;
use crate::core::ResultSet;
use anyhow::{Context, Result};
use clap::ValueEnum;
use comfy_table::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON, one object per date
    #[default]
    Json,
    /// A table with sale/purchase columns per currency
    Table,
}

/// Renders the result set as 2-space indented JSON. Non-ASCII text is kept
/// as-is.
pub fn render_json(results: &ResultSet) -> Result<String> {
    serde_json::to_string_pretty(results).context("Failed to serialize exchange rates")
}

pub fn render_table(results: &ResultSet, currencies: &[String]) -> String {
    if results.is_empty() {
        return ui::style_text("No exchange rates available", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Date")];
    for code in currencies {
        header.push(ui::header_cell(&format!("{code} sale")));
        header.push(ui::header_cell(&format!("{code} purchase")));
    }
    table.set_header(header);

    for entry in results {
        let mut row = vec![Cell::new(entry.date.as_str())];
        for code in currencies {
            match entry.rates.get(code) {
                Some(quote) => {
                    row.push(ui::rate_cell(quote.sale));
                    row.push(ui::rate_cell(quote.purchase));
                }
                None => {
                    row.push(Cell::new("N/A"));
                    row.push(Cell::new("N/A"));
                }
            }
        }
        table.add_row(row);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Exchange rates (UAH)", ui::StyleType::Title),
        table
    )
}

pub fn render(results: &ResultSet, currencies: &[String], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(results),
        OutputFormat::Table => Ok(render_table(results, currencies)),
    }
}
