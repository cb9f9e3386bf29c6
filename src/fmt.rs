use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount with thousands separators: `AED 1,234.56`.
pub fn money(val: Decimal, currency: &str) -> String {
    let rounded = val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let cents = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{currency} {with_commas}.{dec_part}")
    } else {
        format!("{currency} {with_commas}.{dec_part}")
    }
}

/// Percentage with one decimal place: `42.5%`.
pub fn pct(val: Decimal) -> String {
    format!("{:.1}%", val.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}
