//! Union dues.
//!
//! Gross pay from the daily walk is bucketed into calendar months. Each
//! month's dues are rounded to cents and the annual figure is their sum.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::models::{round_cents, MonthlyDues};

use super::daily_walk::{daily_gross, PricedSegment};

/// Monthly dues and their annual total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDues {
    /// Twelve rows, January first.
    pub months: Vec<MonthlyDues>,
    /// Sum of the monthly dues.
    pub total: Decimal,
}

/// Computes union dues at `rate` of each month's gross.
pub fn union_dues(priced: &[PricedSegment], daily_hours: Decimal, rate: Decimal) -> UnionDues {
    let mut gross_by_month = [Decimal::ZERO; 12];
    for (date, day_gross) in daily_gross(priced, daily_hours) {
        gross_by_month[date.month0() as usize] += day_gross;
    }

    let months: Vec<MonthlyDues> = gross_by_month
        .iter()
        .zip(1u32..)
        .map(|(gross, month)| MonthlyDues {
            month,
            gross: round_cents(*gross),
            dues: round_cents(*gross * rate),
        })
        .collect();
    let total = months.iter().map(|month| month.dues).sum();

    UnionDues { months, total }
}
