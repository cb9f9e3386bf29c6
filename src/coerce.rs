//! Lenient field readers for backend payloads.
//!
//! The backend is loose about types: amounts arrive as numbers, numeric
//! strings or `null`, ids as numbers or strings. Every reader here is total
//! and falls back to a zero/empty value instead of failing the whole record.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a decimal out of free text. Unparseable input is zero.
pub fn parse_decimal(raw: &str) -> Decimal {
    let s = raw.trim().replace(',', "");
    if s.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&s)
        .or_else(|_| Decimal::from_scientific(&s))
        .unwrap_or(Decimal::ZERO)
}

pub fn decimal_from_value(value: &Value) -> Decimal {
    match value {
        // Go through the textual form so 0.1 stays 0.1
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => Decimal::ZERO,
    }
}

pub fn amount<'de, D>(de: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.as_ref().map(decimal_from_value).unwrap_or_default())
}

pub fn id<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

pub fn text<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_text(de)?.unwrap_or_default())
}

pub fn opt_text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Non-negative whole count. Fractions truncate, negatives clamp to zero.
pub fn count<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    let n = value.as_ref().map(decimal_from_value).unwrap_or_default();
    Ok(n.trunc().max(Decimal::ZERO).to_u32().unwrap_or(u32::MAX))
}

/// Activity flag. Anything not explicitly negative counts as active.
pub fn flag<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |v| v != 0.0),
        Some(Value::String(s)) => !matches!(
            s.trim().to_lowercase().as_str(),
            "false" | "0" | "no" | "inactive"
        ),
        _ => true,
    })
}

pub fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "amount")]
        amount: Decimal,
        #[serde(default, deserialize_with = "id")]
        id: String,
        #[serde(default, deserialize_with = "count")]
        n: u32,
        #[serde(default = "default_true", deserialize_with = "flag")]
        active: bool,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_amount_accepts_numbers_and_strings() {
        assert_eq!(probe(r#"{"amount": 12.5}"#).amount, dec!(12.5));
        assert_eq!(probe(r#"{"amount": "  99.10 "}"#).amount, dec!(99.10));
        assert_eq!(probe(r#"{"amount": "1,250.75"}"#).amount, dec!(1250.75));
        assert_eq!(probe(r#"{"amount": 0.1}"#).amount, dec!(0.1));
    }

    #[test]
    fn test_amount_defaults_to_zero() {
        assert_eq!(probe(r#"{}"#).amount, Decimal::ZERO);
        assert_eq!(probe(r#"{"amount": null}"#).amount, Decimal::ZERO);
        assert_eq!(probe(r#"{"amount": "abc"}"#).amount, Decimal::ZERO);
        assert_eq!(probe(r#"{"amount": ""}"#).amount, Decimal::ZERO);
        assert_eq!(probe(r#"{"amount": true}"#).amount, Decimal::ZERO);
        assert_eq!(probe(r#"{"amount": [1]}"#).amount, Decimal::ZERO);
    }

    #[test]
    fn test_id_from_number_or_string() {
        assert_eq!(probe(r#"{"id": 7}"#).id, "7");
        assert_eq!(probe(r#"{"id": "acc-7"}"#).id, "acc-7");
        assert_eq!(probe(r#"{"id": null}"#).id, "");
    }

    #[test]
    fn test_count_truncates_and_clamps() {
        assert_eq!(probe(r#"{"n": 6}"#).n, 6);
        assert_eq!(probe(r#"{"n": "3.9"}"#).n, 3);
        assert_eq!(probe(r#"{"n": -2}"#).n, 0);
    }

    #[test]
    fn test_flag_defaults_active() {
        assert!(probe(r#"{}"#).active);
        assert!(probe(r#"{"active": null}"#).active);
        assert!(!probe(r#"{"active": false}"#).active);
        assert!(!probe(r#"{"active": "Inactive"}"#).active);
        assert!(!probe(r#"{"active": 0}"#).active);
    }

    #[test]
    fn test_parse_decimal_scientific() {
        assert_eq!(parse_decimal("1e3"), dec!(1000));
    }
}
