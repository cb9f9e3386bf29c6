use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::Asset;
use crate::reports::total;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDepreciation {
    #[serde(flatten)]
    pub asset: Asset,
    pub annual_depreciation: Decimal,
    pub months_elapsed: u32,
    pub accumulated_depreciation: Decimal,
    pub book_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRegister {
    pub as_of: NaiveDate,
    pub assets: Vec<AssetDepreciation>,
    pub total_cost: Decimal,
    pub total_accumulated: Decimal,
    pub total_book_value: Decimal,
}

fn round2(val: Decimal) -> Decimal {
    val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole calendar months from `start` to `end`; zero if `end` is earlier.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Straight-line estimate, capped at the depreciable base. Arithmetic
/// saturates at the `Decimal` range.
pub fn depreciate(asset: &Asset, as_of: NaiveDate) -> AssetDepreciation {
    let base = asset
        .purchase_cost
        .saturating_sub(asset.salvage_value)
        .max(Decimal::ZERO);
    let life = asset.useful_life_years;

    let months_elapsed = asset
        .purchase_date
        .as_deref()
        .and_then(|d| d.get(..10))
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map_or(0, |purchased| months_between(purchased, as_of));

    let (annual, accumulated) = if life > Decimal::ZERO {
        let annual = base.checked_div(life).unwrap_or(Decimal::MAX);
        let months = Decimal::from(months_elapsed);
        // A life too long to express in months depreciates nothing.
        let accumulated = match life.checked_mul(Decimal::from(12)) {
            None => Decimal::ZERO,
            Some(life_months) => base
                .checked_mul(months)
                .and_then(|v| v.checked_div(life_months))
                .or_else(|| base.checked_div(life_months).and_then(|m| m.checked_mul(months)))
                .unwrap_or(base)
                .min(base),
        };
        (round2(annual), round2(accumulated))
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    AssetDepreciation {
        asset: asset.clone(),
        annual_depreciation: annual,
        months_elapsed,
        accumulated_depreciation: accumulated,
        book_value: asset.purchase_cost.saturating_sub(accumulated),
    }
}

pub fn asset_register(assets: &[Asset], as_of: NaiveDate) -> AssetRegister {
    let rows: Vec<AssetDepreciation> = assets.iter().map(|a| depreciate(a, as_of)).collect();
    AssetRegister {
        as_of,
        total_cost: total(rows.iter().map(|r| r.asset.purchase_cost)),
        total_accumulated: total(rows.iter().map(|r| r.accumulated_depreciation)),
        total_book_value: total(rows.iter().map(|r| r.book_value)),
        assets: rows,
    }
}
