use chrono::{Datelike, NaiveDate};

use crate::error::{GymbiosError, Result};

/// Inclusive reporting window sent to the backend as `from`/`to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| GymbiosError::InvalidDate(format!("{raw} (expected YYYY-MM-DD)")))
}

/// Parse `YYYY-MM`.
pub fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let invalid = || GymbiosError::InvalidDate(format!("{raw} (expected YYYY-MM)"));
    let (y, m) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(GymbiosError::InvalidDate(format!(
                "--from {from} is after --to {to}"
            )));
        }
        Ok(Self { from, to })
    }

    pub fn year(year: i32) -> Result<Self> {
        let from = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| GymbiosError::InvalidDate(format!("year {year}")))?;
        let to = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| GymbiosError::InvalidDate(format!("year {year}")))?;
        Ok(Self { from, to })
    }

    pub fn month(year: i32, month: u32) -> Result<Self> {
        let invalid = || GymbiosError::InvalidDate(format!("{year:04}-{month:02}"));
        let from = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let to = last_day_of_month(year, month).ok_or_else(invalid)?;
        Ok(Self { from, to })
    }

    /// Explicit `from`/`to` win, then `month`, then `year`; the default is
    /// the current calendar year.
    pub fn resolve(
        year: Option<i32>,
        month: Option<&str>,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<Self> {
        match (from_date, to_date) {
            (Some(from), Some(to)) => return Self::new(parse_date(from)?, parse_date(to)?),
            (Some(_), None) => {
                return Err(GymbiosError::Other(
                    "--from requires --to (both date boundaries must be specified)".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(GymbiosError::Other(
                    "--to requires --from (both date boundaries must be specified)".to_string(),
                ));
            }
            (None, None) => {}
        }
        if let Some(m) = month {
            let (y, m) = parse_month(m)?;
            return Self::month(y, m);
        }
        if let Some(y) = year {
            return Self::year(y);
        }
        Self::year(chrono::Local::now().year())
    }

    /// Whether a backend date string falls inside the window. Only the
    /// leading `YYYY-MM-DD` is read, so timestamps work too. Unparseable
    /// dates are kept rather than silently dropped.
    pub fn contains(&self, raw: &str) -> bool {
        match raw.get(..10).map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d")) {
            Some(Ok(date)) => self.from <= date && date <= self.to,
            _ => true,
        }
    }

    pub fn query(&self) -> [(&'static str, String); 2] {
        [("from", self.from.to_string()), ("to", self.to.to_string())]
    }

    pub fn label(&self) -> String {
        format!("{} to {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_resolve_explicit_range() {
        let r = DateRange::resolve(None, None, Some("2025-01-01"), Some("2025-03-31")).unwrap();
        assert_eq!(r.from, d(2025, 1, 1));
        assert_eq!(r.to, d(2025, 3, 31));
    }

    #[test]
    fn test_resolve_rejects_from_without_to() {
        let err = DateRange::resolve(None, None, Some("2025-01-01"), None).unwrap_err();
        assert!(err.to_string().contains("--from requires --to"), "got: {err}");
    }

    #[test]
    fn test_resolve_rejects_to_without_from() {
        let err = DateRange::resolve(None, None, None, Some("2025-12-31")).unwrap_err();
        assert!(err.to_string().contains("--to requires --from"), "got: {err}");
    }

    #[test]
    fn test_resolve_rejects_inverted_range() {
        assert!(DateRange::resolve(None, None, Some("2025-05-01"), Some("2025-04-01")).is_err());
    }

    #[test]
    fn test_resolve_month() {
        let r = DateRange::resolve(Some(2020), Some("2024-02"), None, None).unwrap();
        assert_eq!(r.from, d(2024, 2, 1));
        assert_eq!(r.to, d(2024, 2, 29));
        let r = DateRange::resolve(None, Some("2025-12"), None, None).unwrap();
        assert_eq!(r.to, d(2025, 12, 31));
    }

    #[test]
    fn test_resolve_year_and_default() {
        let r = DateRange::resolve(Some(2023), None, None, None).unwrap();
        assert_eq!(r.from, d(2023, 1, 1));
        assert_eq!(r.to, d(2023, 12, 31));
        let r = DateRange::resolve(None, None, None, None).unwrap();
        assert_eq!(r.from.year(), chrono::Local::now().year());
    }

    #[test]
    fn test_parse_month_rejects_garbage() {
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("March").is_err());
        assert_eq!(parse_month("2025-07").unwrap(), (2025, 7));
    }

    #[test]
    fn test_contains() {
        let r = DateRange::month(2025, 3).unwrap();
        assert!(r.contains("2025-03-01"));
        assert!(r.contains("2025-03-31T23:59:00Z"));
        assert!(!r.contains("2025-04-01"));
        assert!(!r.contains("2025-02-28"));
        assert!(r.contains("not a date"));
    }

    #[test]
    fn test_query_params() {
        let r = DateRange::month(2025, 3).unwrap();
        let q = r.query();
        assert_eq!(q[0], ("from", "2025-03-01".to_string()));
        assert_eq!(q[1], ("to", "2025-03-31".to_string()));
    }
}
