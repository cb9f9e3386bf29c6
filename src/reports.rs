use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Account, BankReconciliation, Expense, PaymentVoucher, ReceiptVoucher, Transaction};
use crate::source::ReportInputs;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

// Groups are matched by substring, case-sensitive, against `account_group`.
const DEBIT_NATURE_GROUPS: &[&str] = &["Assets", "Expenses", "Bank", "Cash"];
const REVENUE_GROUPS: &[&str] = &["Revenue", "Income", "Sales"];
const EXPENSE_GROUPS: &[&str] = &["Expense", "Cost", "Purchase"];
const ASSET_GROUPS: &[&str] = &["Assets", "Fixed Assets", "Current Assets", "Bank", "Cash"];
const LIABILITY_GROUPS: &[&str] = &["Liabilities", "Loans", "Duties"];
const EQUITY_GROUPS: &[&str] = &["Equity", "Capital"];

fn group_matches(account_group: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| account_group.contains(k))
}

/// Debit-natured accounts grow with debits; everything else grows with credits.
pub fn is_debit_nature(account_group: &str) -> bool {
    group_matches(account_group, DEBIT_NATURE_GROUPS)
}

pub(crate) fn total<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

// ---------------------------------------------------------------------------
// Trial Balance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceRow {
    #[serde(flatten)]
    pub account: Account,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub net_balance: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceTotals {
    pub total_opening: Decimal,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub total_net: Decimal,
}

/// One row per account, in input order. Transactions whose `account_id`
/// matches no account are ignored.
pub fn compute_trial_balance(accounts: &[Account], transactions: &[Transaction]) -> Vec<TrialBalanceRow> {
    let mut sums: HashMap<&str, (Decimal, Decimal)> = HashMap::new();
    for t in transactions {
        let entry = sums.entry(t.account_id.as_str()).or_default();
        entry.0 = entry.0.saturating_add(t.debit);
        entry.1 = entry.1.saturating_add(t.credit);
    }

    accounts
        .iter()
        .map(|account| {
            let (total_debit, total_credit) = sums.get(account.id.as_str()).copied().unwrap_or_default();
            let net_balance = if is_debit_nature(&account.account_group) {
                account
                    .opening_balance
                    .saturating_add(total_debit)
                    .saturating_sub(total_credit)
            } else {
                account
                    .opening_balance
                    .saturating_add(total_credit)
                    .saturating_sub(total_debit)
            };
            TrialBalanceRow {
                account: account.clone(),
                total_debit,
                total_credit,
                net_balance,
            }
        })
        .collect()
}

pub fn trial_balance_totals(rows: &[TrialBalanceRow]) -> TrialBalanceTotals {
    TrialBalanceTotals {
        total_opening: total(rows.iter().map(|r| r.account.opening_balance)),
        total_debit: total(rows.iter().map(|r| r.total_debit)),
        total_credit: total(rows.iter().map(|r| r.total_credit)),
        total_net: total(rows.iter().map(|r| r.net_balance)),
    }
}

fn rows_in_groups(trial_balance: &[TrialBalanceRow], keywords: &[&str]) -> Vec<TrialBalanceRow> {
    trial_balance
        .iter()
        .filter(|r| group_matches(&r.account.account_group, keywords))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// P&L
// ---------------------------------------------------------------------------

/// Where a P&L total came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureSource {
    Ledger,
    Vouchers,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnLSummary {
    pub revenue_accounts: Vec<TrialBalanceRow>,
    pub expense_accounts: Vec<TrialBalanceRow>,
    pub total_revenue: Decimal,
    pub total_expense: Decimal,
    pub net_profit: Decimal,
    pub revenue_source: FigureSource,
    pub expense_source: FigureSource,
}

/// Ledger figures win when they are non-zero. A zero ledger revenue is
/// replaced wholesale by receipt totals; a zero ledger expense is replaced by
/// expenses plus payment vouchers.
pub fn compute_pnl(
    trial_balance: &[TrialBalanceRow],
    receipts: &[ReceiptVoucher],
    payments: &[PaymentVoucher],
    expenses: &[Expense],
) -> PnLSummary {
    let revenue_accounts = rows_in_groups(trial_balance, REVENUE_GROUPS);
    let mut total_revenue = total(revenue_accounts.iter().map(|r| r.net_balance));
    let mut revenue_source = FigureSource::Ledger;
    if total_revenue.is_zero() && !receipts.is_empty() {
        total_revenue = total(receipts.iter().map(|r| r.amount));
        revenue_source = FigureSource::Vouchers;
    }

    let expense_accounts = rows_in_groups(trial_balance, EXPENSE_GROUPS);
    let mut total_expense = total(expense_accounts.iter().map(|r| r.net_balance));
    let mut expense_source = FigureSource::Ledger;
    if total_expense.is_zero() {
        total_expense = total(expenses.iter().map(|e| e.amount))
            .saturating_add(total(payments.iter().map(|p| p.amount)));
        if !expenses.is_empty() || !payments.is_empty() {
            expense_source = FigureSource::Vouchers;
        }
    }

    PnLSummary {
        revenue_accounts,
        expense_accounts,
        total_revenue,
        total_expense,
        net_profit: total_revenue.saturating_sub(total_expense),
        revenue_source,
        expense_source,
    }
}

// ---------------------------------------------------------------------------
// Balance Sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetSummary {
    pub assets: Vec<TrialBalanceRow>,
    pub liabilities: Vec<TrialBalanceRow>,
    pub equity: Vec<TrialBalanceRow>,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub total_equity: Decimal,
    pub retained_earnings: Decimal,
    /// `total_assets - (total_liabilities + total_equity + retained_earnings)`
    pub imbalance: Decimal,
    pub is_balanced: bool,
}

/// Takes the already computed P&L: retained earnings are its net profit.
/// Buckets are matched independently, so one account may land in several.
pub fn compute_balance_sheet(trial_balance: &[TrialBalanceRow], pnl: &PnLSummary) -> BalanceSheetSummary {
    let assets = rows_in_groups(trial_balance, ASSET_GROUPS);
    let liabilities = rows_in_groups(trial_balance, LIABILITY_GROUPS);
    let equity = rows_in_groups(trial_balance, EQUITY_GROUPS);

    let total_assets = total(assets.iter().map(|r| r.net_balance));
    let total_liabilities = total(liabilities.iter().map(|r| r.net_balance));
    let total_equity = total(equity.iter().map(|r| r.net_balance));
    let retained_earnings = pnl.net_profit;

    let imbalance = total_assets.saturating_sub(
        total_liabilities
            .saturating_add(total_equity)
            .saturating_add(retained_earnings),
    );

    BalanceSheetSummary {
        assets,
        liabilities,
        equity,
        total_assets,
        total_liabilities,
        total_equity,
        retained_earnings,
        imbalance,
        is_balanced: imbalance.round_dp(2).is_zero(),
    }
}

// ---------------------------------------------------------------------------
// Cash Flow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSummary {
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub net: Decimal,
}

pub fn compute_cash_flow(
    receipts: &[ReceiptVoucher],
    payments: &[PaymentVoucher],
    expenses: &[Expense],
) -> CashFlowSummary {
    let inflow = total(receipts.iter().map(|r| r.amount));
    let outflow = total(payments.iter().map(|p| p.amount))
        .saturating_add(total(expenses.iter().map(|e| e.amount)));
    CashFlowSummary {
        inflow,
        outflow,
        net: inflow.saturating_sub(outflow),
    }
}

// ---------------------------------------------------------------------------
// Expense Breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub name: String,
    pub total: Decimal,
    pub count: usize,
    pub pct: Decimal,
    pub tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCenterTotal {
    pub name: String,
    pub total: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub categories: Vec<ExpenseCategory>,
    pub cost_centers: Vec<CostCenterTotal>,
    pub total: Decimal,
    pub total_tax: Decimal,
}

const UNCATEGORIZED: &str = "Uncategorized";
const UNASSIGNED: &str = "Unassigned";

fn label_or(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Input tax carried by one expense: `amount * tax_rate / 100`.
pub fn expense_tax(expense: &Expense) -> Decimal {
    expense
        .amount
        .checked_mul(expense.tax_rate)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .unwrap_or_default()
}

pub fn get_expense_breakdown(expenses: &[Expense]) -> ExpenseBreakdown {
    let mut by_category: BTreeMap<String, (Decimal, usize, Decimal)> = BTreeMap::new();
    let mut by_center: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();

    for e in expenses {
        let cat = by_category.entry(label_or(&e.category, UNCATEGORIZED)).or_default();
        cat.0 = cat.0.saturating_add(e.amount);
        cat.1 += 1;
        cat.2 = cat.2.saturating_add(expense_tax(e));

        let center = by_center.entry(label_or(&e.cost_center, UNASSIGNED)).or_default();
        center.0 = center.0.saturating_add(e.amount);
        center.1 += 1;
    }

    let grand_total = total(expenses.iter().map(|e| e.amount));
    let total_tax = total(by_category.values().map(|(_, _, tax)| *tax));

    let mut categories: Vec<ExpenseCategory> = by_category
        .into_iter()
        .map(|(name, (t, count, tax))| ExpenseCategory {
            pct: if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                t.checked_div(grand_total)
                    .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
                    .unwrap_or_default()
            },
            name,
            total: t,
            count,
            tax,
        })
        .collect();
    // BTreeMap already yields names in order, so a stable sort keeps the tiebreak.
    categories.sort_by(|a, b| b.total.cmp(&a.total));

    let mut cost_centers: Vec<CostCenterTotal> = by_center
        .into_iter()
        .map(|(name, (t, count))| CostCenterTotal { name, total: t, count })
        .collect();
    cost_centers.sort_by(|a, b| b.total.cmp(&a.total));

    ExpenseBreakdown {
        categories,
        cost_centers,
        total: grand_total,
        total_tax,
    }
}

// ---------------------------------------------------------------------------
// Full statement set
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatements {
    pub trial_balance: Vec<TrialBalanceRow>,
    pub trial_balance_totals: TrialBalanceTotals,
    pub pnl: PnLSummary,
    pub balance_sheet: BalanceSheetSummary,
    pub cash_flow: CashFlowSummary,
    pub bank_reconciliation: BankReconciliation,
}

impl FinancialStatements {
    /// Trial balance first, then P&L, then the balance sheet that reads it.
    pub fn compute(inputs: &ReportInputs) -> Self {
        let trial_balance = compute_trial_balance(&inputs.accounts, &inputs.transactions);
        let trial_balance_totals = trial_balance_totals(&trial_balance);
        let pnl = compute_pnl(&trial_balance, &inputs.receipts, &inputs.payments, &inputs.expenses);
        let balance_sheet = compute_balance_sheet(&trial_balance, &pnl);
        let cash_flow = compute_cash_flow(&inputs.receipts, &inputs.payments, &inputs.expenses);
        Self {
            trial_balance,
            trial_balance_totals,
            pnl,
            balance_sheet,
            cash_flow,
            bank_reconciliation: inputs.bank_reconciliation.clone(),
        }
    }
}
