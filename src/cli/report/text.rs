use colored::Colorize;
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::fmt::{money, pct};
use crate::models::BankReconciliation;
use crate::reports::{
    BalanceSheetSummary, CashFlowSummary, ExpenseBreakdown, FigureSource, PnLSummary,
    TrialBalanceRow, TrialBalanceTotals,
};

fn signed(val: Decimal, currency: &str) -> String {
    if val.is_sign_negative() && !val.is_zero() {
        money(val, currency).red().to_string()
    } else {
        money(val, currency).green().to_string()
    }
}

fn source_note(source: FigureSource, fallback: &str) -> String {
    match source {
        FigureSource::Ledger => String::new(),
        FigureSource::Vouchers => format!(" ({fallback})"),
    }
}

// ---------------------------------------------------------------------------
// Pure formatting functions (report data → String)
// ---------------------------------------------------------------------------

pub fn format_trial_balance(rows: &[TrialBalanceRow], totals: &TrialBalanceTotals, currency: &str) -> String {
    if rows.is_empty() {
        return "Trial Balance\nNo accounts found.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Account", "Group", "Opening", "Debit", "Credit", "Net Balance"]);
    for r in rows {
        table.add_row(vec![
            Cell::new(&r.account.name),
            Cell::new(&r.account.account_group),
            Cell::new(money(r.account.opening_balance, currency)),
            Cell::new(money(r.total_debit, currency)),
            Cell::new(money(r.total_credit, currency)),
            Cell::new(signed(r.net_balance, currency)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(money(totals.total_opening, currency)),
        Cell::new(money(totals.total_debit, currency)),
        Cell::new(money(totals.total_credit, currency)),
        Cell::new(money(totals.total_net, currency)),
    ]);
    format!("Trial Balance\n{table}")
}

pub fn trial_balance_csv(rows: &[TrialBalanceRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "id", "name", "account_group", "opening_balance", "total_debit", "total_credit", "net_balance",
    ])?;
    for r in rows {
        wtr.write_record([
            r.account.id.clone(),
            r.account.name.clone(),
            r.account.account_group.clone(),
            r.account.opening_balance.to_string(),
            r.total_debit.to_string(),
            r.total_credit.to_string(),
            r.net_balance.to_string(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| crate::error::GymbiosError::Other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn format_pnl(pnl: &PnLSummary, currency: &str) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Account", "Amount"]);

    table.add_row(vec![Cell::new("REVENUE".green().bold()), Cell::new("")]);
    for row in &pnl.revenue_accounts {
        table.add_row(vec![
            Cell::new(format!("  {}", row.account.name)),
            Cell::new(money(row.net_balance, currency)),
        ]);
    }
    table.add_row(vec![
        Cell::new(format!(
            "Total Revenue{}",
            source_note(pnl.revenue_source, "from receipt vouchers")
        ).bold()),
        Cell::new(money(pnl.total_revenue, currency)),
    ]);
    table.add_row(vec![Cell::new(""), Cell::new("")]);

    table.add_row(vec![Cell::new("EXPENSES".red().bold()), Cell::new("")]);
    for row in &pnl.expense_accounts {
        table.add_row(vec![
            Cell::new(format!("  {}", row.account.name)),
            Cell::new(money(row.net_balance, currency)),
        ]);
    }
    table.add_row(vec![
        Cell::new(format!(
            "Total Expenses{}",
            source_note(pnl.expense_source, "from expenses and payment vouchers")
        ).bold()),
        Cell::new(money(pnl.total_expense, currency)),
    ]);
    table.add_row(vec![Cell::new(""), Cell::new("")]);

    let net_label = if pnl.net_profit >= Decimal::ZERO {
        "NET PROFIT".green().bold()
    } else {
        "NET LOSS".red().bold()
    };
    table.add_row(vec![Cell::new(net_label), Cell::new(money(pnl.net_profit, currency))]);

    format!("Profit & Loss\n{table}")
}

fn section(table: &mut Table, title: colored::ColoredString, rows: &[TrialBalanceRow], total_label: &str, total: Decimal, currency: &str) {
    table.add_row(vec![Cell::new(title), Cell::new("")]);
    for row in rows {
        table.add_row(vec![
            Cell::new(format!("  {}", row.account.name)),
            Cell::new(money(row.net_balance, currency)),
        ]);
    }
    table.add_row(vec![Cell::new(total_label.bold()), Cell::new(money(total, currency))]);
    table.add_row(vec![Cell::new(""), Cell::new("")]);
}

pub fn format_balance_sheet(bs: &BalanceSheetSummary, currency: &str) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Account", "Amount"]);

    section(&mut table, "ASSETS".green().bold(), &bs.assets, "Total Assets", bs.total_assets, currency);
    section(&mut table, "LIABILITIES".red().bold(), &bs.liabilities, "Total Liabilities", bs.total_liabilities, currency);
    section(&mut table, "EQUITY".cyan().bold(), &bs.equity, "Total Equity", bs.total_equity, currency);

    table.add_row(vec![
        Cell::new("Retained Earnings"),
        Cell::new(signed(bs.retained_earnings, currency)),
    ]);
    let status = if bs.is_balanced {
        "Balanced".green().to_string()
    } else {
        format!("Out of balance by {}", money(bs.imbalance, currency)).red().to_string()
    };
    table.add_row(vec![Cell::new("Check".bold()), Cell::new(status)]);

    format!("Balance Sheet\n{table}")
}

pub fn format_cashflow(cf: &CashFlowSummary, bank: &BankReconciliation, currency: &str) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Item", "Amount"]);
    table.add_row(vec![Cell::new("Inflow (receipts)"), Cell::new(money(cf.inflow, currency))]);
    table.add_row(vec![
        Cell::new("Outflow (payments + expenses)"),
        Cell::new(money(cf.outflow, currency)),
    ]);
    table.add_row(vec![Cell::new("Net".bold()), Cell::new(signed(cf.net, currency))]);
    table.add_row(vec![Cell::new(""), Cell::new("")]);
    table.add_row(vec![
        Cell::new("Bank closing balance"),
        Cell::new(money(bank.closing_balance, currency)),
    ]);
    table.add_row(vec![
        Cell::new("Unreconciled difference"),
        Cell::new(money(bank.difference, currency)),
    ]);
    format!("Cash Flow\n{table}")
}

pub fn format_expenses(data: &ExpenseBreakdown, currency: &str) -> String {
    if data.categories.is_empty() {
        return "Expense Breakdown\nNo expenses found.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%", "Count", "Tax"]);
    for item in &data.categories {
        table.add_row(vec![
            Cell::new(&item.name),
            Cell::new(money(item.total, currency)),
            Cell::new(pct(item.pct)),
            Cell::new(item.count),
            Cell::new(money(item.tax, currency)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(data.total, currency)),
        Cell::new(""),
        Cell::new(""),
        Cell::new(money(data.total_tax, currency)),
    ]);

    let mut ctable = Table::new();
    ctable.set_header(vec!["Cost Center", "Amount", "Count"]);
    for c in &data.cost_centers {
        ctable.add_row(vec![
            Cell::new(&c.name),
            Cell::new(money(c.total, currency)),
            Cell::new(c.count),
        ]);
    }
    format!("Expense Breakdown\n{table}\n\nBy Cost Center\n{ctable}")
}
