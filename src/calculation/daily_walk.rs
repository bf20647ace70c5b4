//! The day-by-day walk shared by the accrual and union-dues engines.
//!
//! Each segment's rate is resolved once, then every calendar day of the year
//! is paid `daily_hours x rate` for the segment containing it.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Aircraft, Seat};

use super::{DateSegment, RateResolver};

/// Average Gregorian year length in days.
pub fn days_per_year() -> Decimal {
    Decimal::new(3_652_425, 4)
}

/// Converts average monthly hours into a constant daily figure.
///
/// ```
/// use pilot_pay_engine::calculation::daily_hours;
/// use rust_decimal::Decimal;
///
/// let per_day = daily_hours(Decimal::from(75));
/// assert_eq!(per_day.round_dp(4), Decimal::new(24641, 4));
/// ```
pub fn daily_hours(avg_monthly_hours: Decimal) -> Decimal {
    avg_monthly_hours * Decimal::from(12) / days_per_year()
}

/// A date segment with its resolved hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedSegment {
    /// The date range, table year and step.
    pub segment: DateSegment,
    /// Hourly rate for the whole range.
    pub rate: Decimal,
}

impl PricedSegment {
    /// Credited hours over the segment.
    pub fn hours(&self, daily_hours: Decimal) -> Decimal {
        daily_hours * Decimal::from(self.segment.days())
    }

    /// Gross over the segment, unrounded.
    pub fn gross(&self, daily_hours: Decimal) -> Decimal {
        self.hours(daily_hours) * self.rate
    }
}

/// Resolves the rate of every segment.
///
/// # Errors
///
/// Fails on the first segment whose rate cannot be resolved. No partial
/// result is returned.
pub fn price_segments(
    resolver: &RateResolver<'_>,
    seat: Seat,
    aircraft: Aircraft,
    special_rate: bool,
    segments: &[DateSegment],
) -> EngineResult<Vec<PricedSegment>> {
    segments
        .iter()
        .map(|segment| {
            let rate = resolver.rate(
                seat,
                aircraft,
                segment.table_year,
                segment.step,
                special_rate,
            )?;
            Ok(PricedSegment {
                segment: *segment,
                rate,
            })
        })
        .collect()
}

/// Yields `(date, gross)` for every day covered by the segments, in order.
pub fn daily_gross(
    priced: &[PricedSegment],
    daily_hours: Decimal,
) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
    priced.iter().flat_map(move |priced| {
        let day_gross = daily_hours * priced.rate;
        priced.segment.dates().map(move |date| (date, day_gross))
    })
}
