pub mod text;

use colored::Colorize;
use serde::Serialize;
use tracing::error;

use crate::cli::{csv_unsupported, emit, to_json, with_header, Globals, OutputFormat, ReportArgs, ReportKind};
use crate::error::Result;
use crate::fmt::money;
use crate::period::DateRange;
use crate::reports::{get_expense_breakdown, ExpenseBreakdown, FinancialStatements};
use crate::settings::{load_settings, Settings};
use crate::source::fetch_report_inputs;

/// Everything a report renderer can draw on.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBundle {
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub statements: FinancialStatements,
    pub expense_breakdown: ExpenseBreakdown,
}

pub fn run(globals: &Globals, args: ReportArgs) -> Result<()> {
    let settings = load_settings();
    let period = &args.period;
    let range = DateRange::resolve(
        period.year,
        period.month.as_deref(),
        period.from_date.as_deref(),
        period.to_date.as_deref(),
    )?;

    let source = globals.open_source(&settings)?;
    let inputs = fetch_report_inputs(source.as_ref(), &range).inspect_err(|e| {
        error!(report = args.kind.report_name(), error = %e, "report load failed");
    })?;

    let bundle = ReportBundle {
        from: range.from.to_string(),
        to: range.to.to_string(),
        statements: FinancialStatements::compute(&inputs),
        expense_breakdown: get_expense_breakdown(&inputs.expenses),
    };

    let content = render(args.kind, args.output.format, &bundle, &range, &settings)?;
    emit(&content, args.output.output.as_deref())?;

    if args.output.format == OutputFormat::Text
        && matches!(args.kind, ReportKind::BalanceSheet | ReportKind::All)
    {
        warn_if_unbalanced(&bundle.statements, &settings.currency);
    }
    Ok(())
}

pub fn render(
    kind: ReportKind,
    format: OutputFormat,
    bundle: &ReportBundle,
    range: &DateRange,
    settings: &Settings,
) -> Result<String> {
    let s = &bundle.statements;
    match format {
        OutputFormat::Json => match kind {
            ReportKind::TrialBalance => to_json(&s.trial_balance),
            ReportKind::Pnl => to_json(&s.pnl),
            ReportKind::BalanceSheet => to_json(&s.balance_sheet),
            ReportKind::Cashflow => to_json(&s.cash_flow),
            ReportKind::Expenses => to_json(&bundle.expense_breakdown),
            ReportKind::All => to_json(bundle),
        },
        OutputFormat::Csv => match kind {
            ReportKind::TrialBalance => text::trial_balance_csv(&s.trial_balance),
            other => Err(csv_unsupported(other.report_name())),
        },
        OutputFormat::Text => {
            let cur = settings.currency.as_str();
            let body = match kind {
                ReportKind::TrialBalance => {
                    text::format_trial_balance(&s.trial_balance, &s.trial_balance_totals, cur)
                }
                ReportKind::Pnl => text::format_pnl(&s.pnl, cur),
                ReportKind::BalanceSheet => text::format_balance_sheet(&s.balance_sheet, cur),
                ReportKind::Cashflow => {
                    text::format_cashflow(&s.cash_flow, &s.bank_reconciliation, cur)
                }
                ReportKind::Expenses => text::format_expenses(&bundle.expense_breakdown, cur),
                ReportKind::All => [
                    text::format_trial_balance(&s.trial_balance, &s.trial_balance_totals, cur),
                    text::format_pnl(&s.pnl, cur),
                    text::format_balance_sheet(&s.balance_sheet, cur),
                    text::format_cashflow(&s.cash_flow, &s.bank_reconciliation, cur),
                    text::format_expenses(&bundle.expense_breakdown, cur),
                ]
                .join("\n\n"),
            };
            let body = format!("Period: {}\n{body}", range.label());
            Ok(with_header(&settings.company_name, body))
        }
    }
}

fn warn_if_unbalanced(statements: &FinancialStatements, currency: &str) {
    let bs = &statements.balance_sheet;
    if !bs.is_balanced {
        eprintln!(
            "{}",
            format!(
                "Warning: balance sheet is out of balance by {} (assets vs liabilities + equity + retained earnings)",
                money(bs.imbalance, currency)
            )
            .yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Snapshot, SnapshotSource};

    fn bundle_from(json: &str) -> (ReportBundle, DateRange) {
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let range = DateRange::year(2025).unwrap();
        let inputs = fetch_report_inputs(&SnapshotSource::new(snapshot), &range).unwrap();
        let bundle = ReportBundle {
            from: range.from.to_string(),
            to: range.to.to_string(),
            statements: FinancialStatements::compute(&inputs),
            expense_breakdown: get_expense_breakdown(&inputs.expenses),
        };
        (bundle, range)
    }

    const DATA: &str = r#"{
        "accounts": [{"id": 1, "name": "Cash", "accountGroup": "Cash", "openingBalance": 1000}],
        "transactions": [
            {"accountId": 1, "debit": 200, "credit": 0},
            {"accountId": 1, "debit": 0, "credit": 50}
        ],
        "receipts": [{"amount": 500}],
        "payments": [{"amount": 200}],
        "expenses": [{"amount": 100, "category": "Utilities", "taxRate": 5}]
    }"#;

    #[test]
    fn test_render_json_trial_balance() {
        let (bundle, range) = bundle_from(DATA);
        let out = render(ReportKind::TrialBalance, OutputFormat::Json, &bundle, &range, &Settings::default()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v[0]["name"], "Cash");
        assert_eq!(v[0]["netBalance"], "1150");
        assert_eq!(v[0]["totalDebit"], "200");
    }

    #[test]
    fn test_render_json_all_has_every_section() {
        let (bundle, range) = bundle_from(DATA);
        let out = render(ReportKind::All, OutputFormat::Json, &bundle, &range, &Settings::default()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        for key in ["trialBalance", "pnl", "balanceSheet", "cashFlow", "bankReconciliation", "expenseBreakdown"] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
        assert_eq!(v["pnl"]["revenueSource"], "vouchers");
        assert_eq!(v["from"], "2025-01-01");
    }

    #[test]
    fn test_render_csv_only_for_trial_balance() {
        let (bundle, range) = bundle_from(DATA);
        let settings = Settings::default();
        assert!(render(ReportKind::TrialBalance, OutputFormat::Csv, &bundle, &range, &settings).is_ok());
        let err = render(ReportKind::Pnl, OutputFormat::Csv, &bundle, &range, &settings).unwrap_err();
        assert!(err.to_string().contains("CSV output is not available for pnl"));
    }

    #[test]
    fn test_render_text_has_header_and_period() {
        let (bundle, range) = bundle_from(DATA);
        let settings = Settings {
            company_name: "Pulse Fitness".to_string(),
            ..Settings::default()
        };
        let out = render(ReportKind::Cashflow, OutputFormat::Text, &bundle, &range, &settings).unwrap();
        assert!(out.starts_with("Pulse Fitness\nPeriod: 2025-01-01 to 2025-12-31"));
        assert!(out.contains("AED 500.00"));
    }
}
