//! Date segmentation of a calculation year.
//!
//! Two contractual dates split every year into three pay-rate-consistent
//! ranges:
//!
//! | Segment | Dates | Table year | Step |
//! |---------|-------|------------|------|
//! | 1 | Jan 1 to the day before the rate switch | `year - 1` | step held on Jan 1 |
//! | 2 | rate switch to the day before step progression | `year` | step held on Jan 1 |
//! | 3 | step progression to Dec 31 | `year` | next step, capped at 12 |
//!
//! The first segment uses the previous year's table because each year's
//! rates take effect at the rate switch date of that year.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ContractTerms;
use crate::error::{EngineError, EngineResult};
use crate::models::Step;

/// A contiguous date range paid from one table year at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSegment {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
    /// Pay table year to use.
    pub table_year: i32,
    /// Step to use.
    pub step: Step,
}

impl DateSegment {
    /// Number of calendar days in the segment.
    pub fn days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1).max(0) as u32
    }

    /// Iterates over every date in the segment.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }
}

/// Resolves the step held on January 1.
///
/// When the step is tied to the year, it is `(year - base_year) + 1`;
/// otherwise the selected step is used. Both are clamped into `1..=12`.
///
/// ```
/// use pilot_pay_engine::calculation::starting_step;
/// use pilot_pay_engine::models::Step;
///
/// assert_eq!(starting_step(2027, Step::clamped(9), true, 2024).get(), 4);
/// assert_eq!(starting_step(2027, Step::clamped(9), false, 2024).get(), 9);
/// assert_eq!(starting_step(2020, Step::clamped(9), true, 2024).get(), 1);
/// ```
pub fn starting_step(year: i32, selected: Step, tie_to_year: bool, base_year: i32) -> Step {
    if tie_to_year {
        Step::clamped(i64::from(year) - i64::from(base_year) + 1)
    } else {
        selected
    }
}

/// Splits `year` into its three pay segments.
///
/// # Errors
///
/// Returns `InvalidInput` if the year is outside the representable calendar.
pub fn segment_year(
    year: i32,
    starting_step: Step,
    terms: &ContractTerms,
) -> EngineResult<[DateSegment; 3]> {
    let bounds = year_bounds(year, terms).ok_or_else(|| EngineError::InvalidInput {
        field: "year".to_string(),
        message: format!("{} is outside the supported calendar", year),
    })?;

    Ok([
        DateSegment {
            start: bounds.jan_1,
            end: bounds.before_switch,
            table_year: year - 1,
            step: starting_step,
        },
        DateSegment {
            start: bounds.switch,
            end: bounds.before_progression,
            table_year: year,
            step: starting_step,
        },
        DateSegment {
            start: bounds.progression,
            end: bounds.dec_31,
            table_year: year,
            step: starting_step.next(),
        },
    ])
}

struct YearBounds {
    jan_1: NaiveDate,
    before_switch: NaiveDate,
    switch: NaiveDate,
    before_progression: NaiveDate,
    progression: NaiveDate,
    dec_31: NaiveDate,
}

fn year_bounds(year: i32, terms: &ContractTerms) -> Option<YearBounds> {
    let switch = terms.rate_switch.in_year(year)?;
    let progression = terms.step_progression.in_year(year)?;
    Some(YearBounds {
        jan_1: NaiveDate::from_ymd_opt(year, 1, 1)?,
        before_switch: switch.pred_opt()?,
        switch,
        before_progression: progression.pred_opt()?,
        progression,
        dec_31: NaiveDate::from_ymd_opt(year, 12, 31)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::fixtures;
    use chrono::Datelike;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_segments_around_contract_dates() {
        let terms = fixtures::terms();
        let segments = segment_year(2025, Step::clamped(4), &terms).unwrap();

        assert_eq!(segments[0].start, date(2025, 1, 1));
        assert_eq!(segments[0].end, date(2025, 9, 29));
        assert_eq!(segments[0].table_year, 2024);
        assert_eq!(segments[0].step.get(), 4);

        assert_eq!(segments[1].start, date(2025, 9, 30));
        assert_eq!(segments[1].end, date(2025, 10, 31));
        assert_eq!(segments[1].table_year, 2025);
        assert_eq!(segments[1].step.get(), 4);

        assert_eq!(segments[2].start, date(2025, 11, 1));
        assert_eq!(segments[2].end, date(2025, 12, 31));
        assert_eq!(segments[2].table_year, 2025);
        assert_eq!(segments[2].step.get(), 5);
    }

    #[test]
    fn test_top_step_does_not_advance() {
        let terms = fixtures::terms();
        let segments = segment_year(2025, Step::MAX, &terms).unwrap();
        assert_eq!(segments[2].step, Step::MAX);
    }

    #[test]
    fn test_segment_days_cover_leap_year() {
        let terms = fixtures::terms();
        let segments = segment_year(2028, Step::MIN, &terms).unwrap();
        let total: u32 = segments.iter().map(DateSegment::days).sum();
        assert_eq!(total, 366);
    }

    #[test]
    fn test_dates_iterates_inclusive_range() {
        let segment = DateSegment {
            start: date(2025, 10, 30),
            end: date(2025, 11, 2),
            table_year: 2025,
            step: Step::MIN,
        };
        let dates: Vec<NaiveDate> = segment.dates().collect();
        assert_eq!(dates.len(), 4);
        assert_eq!(dates.last(), Some(&date(2025, 11, 2)));
    }

    #[test]
    fn test_tied_step_clamps_high() {
        assert_eq!(starting_step(2050, Step::MIN, true, 2024), Step::MAX);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_segments_are_contiguous_and_cover_year(year in 1900i32..2200, step in 1u8..=12) {
            let terms = fixtures::terms();
            let segments = segment_year(year, Step::from(step), &terms).unwrap();

            prop_assert_eq!(segments[0].start, date(year, 1, 1));
            prop_assert_eq!(segments[2].end, date(year, 12, 31));
            for pair in segments.windows(2) {
                prop_assert_eq!(pair[0].end.succ_opt().unwrap(), pair[1].start);
            }

            let days: u32 = segments.iter().map(DateSegment::days).sum();
            let expected = if date(year, 12, 31).ordinal() == 366 { 366 } else { 365 };
            prop_assert_eq!(days, expected);
        }
    }
}
