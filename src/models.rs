use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coerce;

/// A ledger account. `account_group` is free text: the standard groups are
/// Assets, Liabilities, Income, Expenses and Equity, but the backend allows
/// custom groups such as "Bank Accounts" or "Duties & Taxes".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default, deserialize_with = "coerce::id")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: String,
    #[serde(default, alias = "account_group", deserialize_with = "coerce::text")]
    pub account_group: String,
    #[serde(default, alias = "opening_balance", deserialize_with = "coerce::amount")]
    pub opening_balance: Decimal,
    #[serde(default, deserialize_with = "coerce::opt_text")]
    pub branch: Option<String>,
    #[serde(default, alias = "cost_center_id", deserialize_with = "coerce::opt_text")]
    pub cost_center_id: Option<String>,
    #[serde(default = "coerce::default_true", deserialize_with = "coerce::flag")]
    pub active: bool,
}

/// A single ledger posting. Only one of `debit`/`credit` is expected to be
/// non-zero per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, deserialize_with = "coerce::id")]
    pub id: String,
    #[serde(default, alias = "account_id", deserialize_with = "coerce::id")]
    pub account_id: String,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub debit: Decimal,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub credit: Decimal,
    #[serde(default, alias = "txn_date", deserialize_with = "coerce::opt_text")]
    pub txn_date: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub particulars: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptVoucher {
    #[serde(default, deserialize_with = "coerce::id")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub amount: Decimal,
    #[serde(default, alias = "voucher_date", deserialize_with = "coerce::opt_text")]
    pub voucher_date: Option<String>,
    #[serde(default, alias = "income_source_name", deserialize_with = "coerce::text")]
    pub income_source_name: String,
    #[serde(default, alias = "payment_mode", deserialize_with = "coerce::text")]
    pub payment_mode: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVoucher {
    #[serde(default, deserialize_with = "coerce::id")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub amount: Decimal,
    #[serde(default, alias = "payment_date", deserialize_with = "coerce::opt_text")]
    pub payment_date: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub party: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub method: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, deserialize_with = "coerce::id")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "coerce::opt_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub category: String,
    #[serde(default, alias = "cost_center", deserialize_with = "coerce::text")]
    pub cost_center: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub location: String,
    /// Percentage, e.g. 5 for 5% VAT.
    #[serde(default, alias = "tax_rate", deserialize_with = "coerce::amount")]
    pub tax_rate: Decimal,
    #[serde(default, deserialize_with = "coerce::text")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankReconciliation {
    #[serde(default, alias = "closing_balance", deserialize_with = "coerce::amount")]
    pub closing_balance: Decimal,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub difference: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default, deserialize_with = "coerce::id")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub category: String,
    #[serde(default, alias = "purchase_cost", deserialize_with = "coerce::amount")]
    pub purchase_cost: Decimal,
    #[serde(default, alias = "salvage_value", deserialize_with = "coerce::amount")]
    pub salvage_value: Decimal,
    #[serde(default, alias = "useful_life_years", deserialize_with = "coerce::amount")]
    pub useful_life_years: Decimal,
    #[serde(default, alias = "purchase_date", deserialize_with = "coerce::opt_text")]
    pub purchase_date: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryAdvance {
    #[serde(default, deserialize_with = "coerce::id")]
    pub id: String,
    #[serde(default, alias = "employee_name", deserialize_with = "coerce::text")]
    pub employee_name: String,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "coerce::count")]
    pub installments: u32,
    #[serde(default, alias = "amount_repaid", deserialize_with = "coerce::amount")]
    pub amount_repaid: Decimal,
    #[serde(default, alias = "start_date", deserialize_with = "coerce::opt_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, deserialize_with = "coerce::id")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: String,
    #[serde(default, deserialize_with = "coerce::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_text")]
    pub plan: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymClass {
    #[serde(default, deserialize_with = "coerce::id")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: String,
    #[serde(default, deserialize_with = "coerce::opt_text")]
    pub trainer: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_text")]
    pub schedule: Option<String>,
    #[serde(default, deserialize_with = "coerce::count")]
    pub capacity: u32,
    #[serde(default, deserialize_with = "coerce::count")]
    pub booked: u32,
}

/// Records that carry a business date, used for date-range filtering.
pub trait Dated {
    fn record_date(&self) -> Option<&str>;
}

impl Dated for Transaction {
    fn record_date(&self) -> Option<&str> {
        self.txn_date.as_deref()
    }
}

impl Dated for ReceiptVoucher {
    fn record_date(&self) -> Option<&str> {
        self.voucher_date.as_deref()
    }
}

impl Dated for PaymentVoucher {
    fn record_date(&self) -> Option<&str> {
        self.payment_date.as_deref()
    }
}

impl Dated for Expense {
    fn record_date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}
