use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::SalaryAdvance;
use crate::reports::total;

/// Longest repayment plan scheduled: fifty years of monthly deductions.
pub const MAX_INSTALLMENTS: u32 = 600;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub number: u32,
    pub due_date: Option<NaiveDate>,
    pub amount: Decimal,
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceSchedule {
    #[serde(flatten)]
    pub advance: SalaryAdvance,
    pub installment_amount: Decimal,
    pub installments_paid: u32,
    pub outstanding: Decimal,
    pub progress_pct: Decimal,
    pub schedule: Vec<Installment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancesSummary {
    pub advances: Vec<AdvanceSchedule>,
    pub total_advanced: Decimal,
    pub total_repaid: Decimal,
    pub total_outstanding: Decimal,
}

fn round2(val: Decimal) -> Decimal {
    val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Equal monthly installments; the last one absorbs the rounding remainder
/// so the schedule always sums to the advance. Counts are clamped to
/// `1..=MAX_INSTALLMENTS`.
pub fn amortize(advance: &SalaryAdvance) -> AdvanceSchedule {
    let count = advance.installments.clamp(1, MAX_INSTALLMENTS);
    let installment_amount = round2(
        advance
            .amount
            .checked_div(Decimal::from(count))
            .unwrap_or_default(),
    );
    let start = advance
        .start_date
        .as_deref()
        .and_then(|d| d.get(..10))
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

    let mut schedule = Vec::with_capacity(count as usize);
    let mut scheduled = Decimal::ZERO;
    for number in 1..=count {
        let amount = if number == count {
            advance
                .amount
                .saturating_sub(installment_amount.saturating_mul(Decimal::from(count - 1)))
        } else {
            installment_amount
        };
        scheduled = scheduled.saturating_add(amount);
        schedule.push(Installment {
            number,
            due_date: start.and_then(|s| s.checked_add_months(Months::new(number - 1))),
            amount,
            paid: !advance.amount.is_zero() && scheduled <= advance.amount_repaid,
        });
    }

    let progress_pct = if advance.amount.is_zero() {
        Decimal::ZERO
    } else {
        let pct = advance
            .amount_repaid
            .checked_div(advance.amount)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ONE_HUNDRED);
        round2(pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    };

    AdvanceSchedule {
        advance: advance.clone(),
        installment_amount,
        installments_paid: schedule.iter().filter(|i| i.paid).count() as u32,
        outstanding: advance
            .amount
            .saturating_sub(advance.amount_repaid)
            .max(Decimal::ZERO),
        progress_pct,
        schedule,
    }
}

pub fn summarize(advances: &[SalaryAdvance]) -> AdvancesSummary {
    let rows: Vec<AdvanceSchedule> = advances.iter().map(amortize).collect();
    AdvancesSummary {
        total_advanced: total(rows.iter().map(|r| r.advance.amount)),
        total_repaid: total(rows.iter().map(|r| r.advance.amount_repaid)),
        total_outstanding: total(rows.iter().map(|r| r.outstanding)),
        advances: rows,
    }
}
