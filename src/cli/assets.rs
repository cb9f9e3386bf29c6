use chrono::{Local, NaiveDate};
use comfy_table::{Cell, Table};
use tracing::debug;

use crate::assets::{asset_register, AssetRegister};
use crate::cli::{csv_unsupported, emit, to_json, with_header, Globals, OutputArgs, OutputFormat};
use crate::error::{GymbiosError, Result};
use crate::fmt::money;
use crate::settings::load_settings;

pub fn run(globals: &Globals, as_of: Option<String>, output: OutputArgs) -> Result<()> {
    let settings = load_settings();
    let as_of = match as_of.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| GymbiosError::InvalidDate(format!("{raw} (expected YYYY-MM-DD)")))?,
        None => Local::now().date_naive(),
    };

    let source = globals.open_source(&settings)?;
    let assets = source.assets()?;
    debug!(count = assets.len(), %as_of, "depreciating assets");
    let register = asset_register(&assets, as_of);

    let content = match output.format {
        OutputFormat::Json => to_json(&register)?,
        OutputFormat::Csv => return Err(csv_unsupported("assets")),
        OutputFormat::Text => with_header(&settings.company_name, format_register(&register, &settings.currency)),
    };
    emit(&content, output.output.as_deref())
}

pub fn format_register(register: &AssetRegister, currency: &str) -> String {
    if register.assets.is_empty() {
        return format!("Asset Register as of {}\nNo assets found.", register.as_of);
    }
    let mut table = Table::new();
    table.set_header(vec!["Asset", "Category", "Cost", "Annual Dep.", "Months", "Accumulated", "Book Value"]);
    for row in &register.assets {
        table.add_row(vec![
            Cell::new(&row.asset.name),
            Cell::new(&row.asset.category),
            Cell::new(money(row.asset.purchase_cost, currency)),
            Cell::new(money(row.annual_depreciation, currency)),
            Cell::new(row.months_elapsed),
            Cell::new(money(row.accumulated_depreciation, currency)),
            Cell::new(money(row.book_value, currency)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(""),
        Cell::new(money(register.total_cost, currency)),
        Cell::new(""),
        Cell::new(""),
        Cell::new(money(register.total_accumulated, currency)),
        Cell::new(money(register.total_book_value, currency)),
    ]);
    format!("Asset Register as of {}\n{table}", register.as_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Asset;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_register() {
        let asset = Asset {
            id: "A1".to_string(),
            name: "Rowing Machine".to_string(),
            category: "Cardio".to_string(),
            purchase_cost: dec!(12000),
            salvage_value: dec!(0),
            useful_life_years: dec!(5),
            purchase_date: Some("2024-01-01".to_string()),
            status: "active".to_string(),
        };
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let out = format_register(&asset_register(&[asset], as_of), "AED");
        assert!(out.starts_with("Asset Register as of 2025-01-01"));
        assert!(out.contains("Rowing Machine"));
        assert!(out.contains("AED 9,600.00"));
    }

    #[test]
    fn test_format_register_empty() {
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let out = format_register(&asset_register(&[], as_of), "AED");
        assert!(out.contains("No assets found."));
    }
}
