use comfy_table::{Cell, Table};

use crate::advances::{summarize, AdvancesSummary};
use crate::cli::{csv_unsupported, emit, to_json, with_header, Globals, OutputArgs, OutputFormat};
use crate::error::Result;
use crate::fmt::money;
use crate::settings::load_settings;

pub fn run(globals: &Globals, schedule: bool, output: OutputArgs) -> Result<()> {
    let settings = load_settings();
    let source = globals.open_source(&settings)?;
    let summary = summarize(&source.salary_advances()?);

    let content = match output.format {
        OutputFormat::Json => to_json(&summary)?,
        OutputFormat::Csv => return Err(csv_unsupported("advances")),
        OutputFormat::Text => with_header(
            &settings.company_name,
            format_advances(&summary, schedule, &settings.currency),
        ),
    };
    emit(&content, output.output.as_deref())
}

pub fn format_advances(summary: &AdvancesSummary, schedule: bool, currency: &str) -> String {
    if summary.advances.is_empty() {
        return "Salary Advances\nNo salary advances found.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Employee", "Advanced", "Installment", "Paid", "Repaid", "Outstanding", "Progress"]);
    for a in &summary.advances {
        table.add_row(vec![
            Cell::new(&a.advance.employee_name),
            Cell::new(money(a.advance.amount, currency)),
            Cell::new(money(a.installment_amount, currency)),
            Cell::new(format!("{}/{}", a.installments_paid, a.schedule.len())),
            Cell::new(money(a.advance.amount_repaid, currency)),
            Cell::new(money(a.outstanding, currency)),
            Cell::new(format!("{}%", a.progress_pct)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(money(summary.total_advanced, currency)),
        Cell::new(""),
        Cell::new(""),
        Cell::new(money(summary.total_repaid, currency)),
        Cell::new(money(summary.total_outstanding, currency)),
        Cell::new(""),
    ]);
    let mut out = format!("Salary Advances\n{table}");

    if schedule {
        for a in &summary.advances {
            let mut st = Table::new();
            st.set_header(vec!["#", "Due", "Amount", "Status"]);
            for i in &a.schedule {
                st.add_row(vec![
                    Cell::new(i.number),
                    Cell::new(i.due_date.map_or_else(|| "-".to_string(), |d| d.to_string())),
                    Cell::new(money(i.amount, currency)),
                    Cell::new(if i.paid { "paid" } else { "due" }),
                ]);
            }
            out.push_str(&format!("\n\n{}\n{st}", a.advance.employee_name));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SalaryAdvance;
    use rust_decimal_macros::dec;

    fn summary() -> AdvancesSummary {
        summarize(&[SalaryAdvance {
            id: "7".to_string(),
            employee_name: "Omar".to_string(),
            amount: dec!(900),
            installments: 3,
            amount_repaid: dec!(300),
            start_date: Some("2025-02-01".to_string()),
            status: "active".to_string(),
        }])
    }

    #[test]
    fn test_format_advances() {
        let out = format_advances(&summary(), false, "AED");
        assert!(out.contains("Omar"));
        assert!(out.contains("1/3"));
        assert!(out.contains("AED 600.00"));
        assert!(!out.contains("2025-03-01"));
    }

    #[test]
    fn test_format_advances_with_schedule() {
        let out = format_advances(&summary(), true, "AED");
        assert!(out.contains("2025-03-01"));
        assert!(out.contains("paid"));
    }
}
