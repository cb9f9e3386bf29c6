use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::models::{
    Account, Asset, BankReconciliation, Expense, GymClass, Member, PaymentVoucher, ReceiptVoucher,
    SalaryAdvance, Transaction,
};
use crate::period::DateRange;
use crate::source::LedgerSource;

pub const ACCOUNTS_PATH: &str = "/ledgers/accounts";
pub const TRANSACTIONS_PATH: &str = "/ledgers/transactions";
pub const RECEIPTS_PATH: &str = "/vouchers/receipts";
pub const PAYMENTS_PATH: &str = "/vouchers/payments";
pub const EXPENSES_PATH: &str = "/expenses";
pub const BANK_RECONCILIATION_PATH: &str = "/bank-reconciliation/summary";
pub const ASSETS_PATH: &str = "/assets";
pub const SALARY_ADVANCES_PATH: &str = "/payroll/salary-advances";
pub const MEMBERS_PATH: &str = "/members";
pub const CLASSES_PATH: &str = "/classes";

/// Responses come either bare or wrapped in `{"data": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// REST client for the GymBios backend.
pub struct HttpSource {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl HttpSource {
    /// `timeout` of `None` lets a request wait indefinitely.
    pub fn new(base_url: &str, token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            client: builder.build()?,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?.error_for_status()?;
        let body: Envelope<T> = response.json()?;
        Ok(body.into_inner())
    }
}

impl LedgerSource for HttpSource {
    fn origin(&self) -> String {
        self.base_url.clone()
    }

    fn accounts(&self) -> Result<Vec<Account>> {
        self.get(ACCOUNTS_PATH, &[])
    }

    fn transactions(&self, range: &DateRange) -> Result<Vec<Transaction>> {
        self.get(TRANSACTIONS_PATH, &range.query())
    }

    fn receipts(&self, range: &DateRange) -> Result<Vec<ReceiptVoucher>> {
        self.get(RECEIPTS_PATH, &range.query())
    }

    fn payments(&self, range: &DateRange) -> Result<Vec<PaymentVoucher>> {
        self.get(PAYMENTS_PATH, &range.query())
    }

    fn expenses(&self, range: &DateRange) -> Result<Vec<Expense>> {
        self.get(EXPENSES_PATH, &range.query())
    }

    fn bank_reconciliation(&self, range: &DateRange) -> Result<BankReconciliation> {
        self.get(BANK_RECONCILIATION_PATH, &range.query())
    }

    fn assets(&self) -> Result<Vec<Asset>> {
        self.get(ASSETS_PATH, &[])
    }

    fn salary_advances(&self) -> Result<Vec<SalaryAdvance>> {
        self.get(SALARY_ADVANCES_PATH, &[])
    }

    fn members(&self) -> Result<Vec<Member>> {
        self.get(MEMBERS_PATH, &[])
    }

    fn classes(&self) -> Result<Vec<GymClass>> {
        self.get(CLASSES_PATH, &[])
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    use super::*;
    use rust_decimal_macros::dec;

    /// Serve one canned JSON response and hand back the raw request.
    fn serve_once(body: &'static str, status: &'static str) -> (String, std::thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&buf).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn test_envelope_accepts_bare_and_wrapped() {
        let bare: Envelope<Vec<Account>> = serde_json::from_str(r#"[{"id": 1}]"#).unwrap();
        assert_eq!(bare.into_inner().len(), 1);
        let wrapped: Envelope<Vec<Account>> =
            serde_json::from_str(r#"{"data": [{"id": 1}, {"id": 2}]}"#).unwrap();
        assert_eq!(wrapped.into_inner().len(), 2);
        let empty: Envelope<Vec<Account>> = serde_json::from_str("[]").unwrap();
        assert!(empty.into_inner().is_empty());
    }

    #[test]
    fn test_envelope_object_payload() {
        let bare: Envelope<BankReconciliation> =
            serde_json::from_str(r#"{"closing_balance": 10, "difference": 2}"#).unwrap();
        assert_eq!(bare.into_inner().difference, dec!(2));
        let wrapped: Envelope<BankReconciliation> =
            serde_json::from_str(r#"{"data": {"closing_balance": 10}}"#).unwrap();
        assert_eq!(wrapped.into_inner().closing_balance, dec!(10));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let source = HttpSource::new("https://api.example.com/v1/", None, None).unwrap();
        assert_eq!(source.endpoint(ACCOUNTS_PATH), "https://api.example.com/v1/ledgers/accounts");
        assert_eq!(source.origin(), "https://api.example.com/v1");
    }

    #[test]
    fn test_transactions_request_carries_range_and_token() {
        let (base, server) = serve_once(
            r#"{"data": [{"id": 1, "accountId": 4, "debit": "25.50", "credit": 0}]}"#,
            "200 OK",
        );
        let source = HttpSource::new(&base, Some("secret".to_string()), Some(Duration::from_secs(5))).unwrap();
        let range = DateRange::month(2025, 3).unwrap();
        let txns = source.transactions(&range).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].debit, dec!(25.50));

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /ledgers/transactions?from=2025-03-01&to=2025-03-31 "), "got: {request}");
        assert!(request.to_lowercase().contains("authorization: bearer secret"));
    }

    #[test]
    fn test_http_error_status_is_an_error() {
        let (base, server) = serve_once(r#"{"message": "down"}"#, "503 Service Unavailable");
        let source = HttpSource::new(&base, None, Some(Duration::from_secs(5))).unwrap();
        assert!(source.accounts().is_err());
        server.join().unwrap();
    }
}
