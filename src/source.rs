use std::path::{Path, PathBuf};
use std::thread::{self, ScopedJoinHandle};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{GymbiosError, Result};
use crate::models::{
    Account, Asset, BankReconciliation, Dated, Expense, GymClass, Member, PaymentVoucher,
    ReceiptVoucher, SalaryAdvance, Transaction,
};
use crate::period::DateRange;

/// Read side of the GymBios backend.
pub trait LedgerSource: Sync {
    /// Stable identifier of where the data comes from, used to scope caches.
    fn origin(&self) -> String;
    fn accounts(&self) -> Result<Vec<Account>>;
    fn transactions(&self, range: &DateRange) -> Result<Vec<Transaction>>;
    fn receipts(&self, range: &DateRange) -> Result<Vec<ReceiptVoucher>>;
    fn payments(&self, range: &DateRange) -> Result<Vec<PaymentVoucher>>;
    fn expenses(&self, range: &DateRange) -> Result<Vec<Expense>>;
    fn bank_reconciliation(&self, range: &DateRange) -> Result<BankReconciliation>;
    fn assets(&self) -> Result<Vec<Asset>>;
    fn salary_advances(&self) -> Result<Vec<SalaryAdvance>>;
    fn members(&self) -> Result<Vec<Member>>;
    fn classes(&self) -> Result<Vec<GymClass>>;
}

/// Everything the financial statements are computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportInputs {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub receipts: Vec<ReceiptVoucher>,
    pub payments: Vec<PaymentVoucher>,
    pub expenses: Vec<Expense>,
    pub bank_reconciliation: BankReconciliation,
}

fn join<T>(resource: &'static str, handle: ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    match handle.join() {
        Ok(Ok(value)) => {
            debug!(resource, "fetched");
            Ok(value)
        }
        Ok(Err(e)) => {
            warn!(resource, error = %e, "fetch failed");
            Err(GymbiosError::Fetch {
                resource,
                message: e.to_string(),
            })
        }
        Err(_) => {
            warn!(resource, "fetch worker panicked");
            Err(GymbiosError::Fetch {
                resource,
                message: "fetch worker panicked".to_string(),
            })
        }
    }
}

/// Issue the six report reads concurrently and wait for all of them.
/// Any single failure fails the whole load; nothing is retried.
pub fn fetch_report_inputs<S>(source: &S, range: &DateRange) -> Result<ReportInputs>
where
    S: LedgerSource + ?Sized,
{
    info!(origin = %source.origin(), range = %range.label(), "loading report inputs");
    thread::scope(|s| {
        let accounts = s.spawn(|| source.accounts());
        let transactions = s.spawn(|| source.transactions(range));
        let receipts = s.spawn(|| source.receipts(range));
        let payments = s.spawn(|| source.payments(range));
        let expenses = s.spawn(|| source.expenses(range));
        let bank = s.spawn(|| source.bank_reconciliation(range));

        // Join every handle before inspecting any result.
        let accounts = join("accounts", accounts);
        let transactions = join("transactions", transactions);
        let receipts = join("receipts", receipts);
        let payments = join("payments", payments);
        let expenses = join("expenses", expenses);
        let bank = join("bank reconciliation", bank);

        Ok(ReportInputs {
            accounts: accounts?,
            transactions: transactions?,
            receipts: receipts?,
            payments: payments?,
            expenses: expenses?,
            bank_reconciliation: bank?,
        })
    })
}

// ---------------------------------------------------------------------------
// Snapshot files
// ---------------------------------------------------------------------------

/// A JSON export of the backend collections, for offline reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub receipts: Vec<ReceiptVoucher>,
    pub payments: Vec<PaymentVoucher>,
    pub expenses: Vec<Expense>,
    #[serde(alias = "bank_reconciliation")]
    pub bank_reconciliation: BankReconciliation,
    pub assets: Vec<Asset>,
    #[serde(alias = "salary_advances")]
    pub salary_advances: Vec<SalaryAdvance>,
    pub members: Vec<Member>,
    pub classes: Vec<GymClass>,
}

pub struct SnapshotSource {
    path: PathBuf,
    modified: Option<SystemTime>,
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GymbiosError::Other(format!("Cannot read snapshot {}: {e}", path.display()))
        })?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        debug!(path = %path.display(), accounts = snapshot.accounts.len(), "snapshot loaded");
        Ok(Self {
            path: path.to_path_buf(),
            modified: std::fs::metadata(path).and_then(|m| m.modified()).ok(),
            snapshot,
        })
    }

    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            modified: None,
            snapshot,
        }
    }
}

fn in_range<T: Dated + Clone>(items: &[T], range: &DateRange) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.record_date().map_or(true, |d| range.contains(d)))
        .cloned()
        .collect()
}

impl LedgerSource for SnapshotSource {
    /// Includes the file's modification time so cached lists follow edits.
    fn origin(&self) -> String {
        match self.modified.and_then(|t| t.duration_since(UNIX_EPOCH).ok()) {
            Some(age) => format!("snapshot:{}@{}", self.path.display(), age.as_nanos()),
            None => format!("snapshot:{}", self.path.display()),
        }
    }

    fn accounts(&self) -> Result<Vec<Account>> {
        Ok(self.snapshot.accounts.clone())
    }

    fn transactions(&self, range: &DateRange) -> Result<Vec<Transaction>> {
        Ok(in_range(&self.snapshot.transactions, range))
    }

    fn receipts(&self, range: &DateRange) -> Result<Vec<ReceiptVoucher>> {
        Ok(in_range(&self.snapshot.receipts, range))
    }

    fn payments(&self, range: &DateRange) -> Result<Vec<PaymentVoucher>> {
        Ok(in_range(&self.snapshot.payments, range))
    }

    fn expenses(&self, range: &DateRange) -> Result<Vec<Expense>> {
        Ok(in_range(&self.snapshot.expenses, range))
    }

    fn bank_reconciliation(&self, _range: &DateRange) -> Result<BankReconciliation> {
        Ok(self.snapshot.bank_reconciliation.clone())
    }

    fn assets(&self) -> Result<Vec<Asset>> {
        Ok(self.snapshot.assets.clone())
    }

    fn salary_advances(&self) -> Result<Vec<SalaryAdvance>> {
        Ok(self.snapshot.salary_advances.clone())
    }

    fn members(&self) -> Result<Vec<Member>> {
        Ok(self.snapshot.members.clone())
    }

    fn classes(&self) -> Result<Vec<GymClass>> {
        Ok(self.snapshot.classes.clone())
    }
}
