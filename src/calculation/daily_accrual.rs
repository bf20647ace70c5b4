//! Day-by-day accrual of pension-plan contributions, insurance premiums and
//! tenure-based pension accrual.
//!
//! Contributions are computed on the increment of cumulative gross that
//! falls inside each annual band on that day, not on the lump annual gross:
//! the hourly rate changes mid-year, so where the ceilings are crossed
//! matters.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{AccrualTier, InsuranceConfig, PensionPlanConfig, SchemeConfig};

use super::daily_walk::{days_per_year, daily_gross, PricedSegment};

/// Cumulative bases carried across the walk of one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccrualState {
    /// Gross earned so far this year.
    pub cumulative_gross: Decimal,
    /// Portion of cumulative gross under the maximum insurable earnings.
    pub insurable_base: Decimal,
    /// Portion of cumulative gross between the exemption and first ceiling.
    pub tier1_base: Decimal,
    /// Portion of cumulative gross between the first and second ceilings.
    pub tier2_base: Decimal,
}

/// Base increments produced by one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DayIncrement {
    insurable: Decimal,
    tier1: Decimal,
    tier2: Decimal,
}

impl AccrualState {
    fn advance(
        &mut self,
        day_gross: Decimal,
        pension: &PensionPlanConfig,
        insurance: &InsuranceConfig,
    ) -> DayIncrement {
        self.cumulative_gross += day_gross;
        let cumulative = self.cumulative_gross;

        let insurable = band(cumulative, Decimal::ZERO, insurance.max_insurable_earnings);
        let tier1 = band(cumulative, pension.basic_exemption, pension.first_ceiling);
        let tier2 = band(cumulative, pension.first_ceiling, pension.second_ceiling);

        let increment = DayIncrement {
            insurable: insurable - self.insurable_base,
            tier1: tier1 - self.tier1_base,
            tier2: tier2 - self.tier2_base,
        };

        self.insurable_base = insurable;
        self.tier1_base = tier1;
        self.tier2_base = tier2;
        increment
    }
}

/// Amount of `cumulative` lying between `floor` and `ceiling`.
fn band(cumulative: Decimal, floor: Decimal, ceiling: Decimal) -> Decimal {
    (cumulative.min(ceiling) - floor).max(Decimal::ZERO)
}

/// Unrounded totals of one year's walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccrualTotals {
    /// Sum of daily gross.
    pub gross: Decimal,
    /// Tier-1 pension-plan contribution.
    pub pension_tier1: Decimal,
    /// Tier-2 pension-plan contribution.
    pub pension_tier2: Decimal,
    /// Insurance premium, capped at the annual maximum.
    pub insurance_premium: Decimal,
    /// Tenure-based pension accrual.
    pub pension_accrual: Decimal,
}

impl AccrualTotals {
    /// Both pension tiers together.
    pub fn pension_total(&self) -> Decimal {
        self.pension_tier1 + self.pension_tier2
    }
}

/// Years of service at `date`, using the average Gregorian year.
///
/// Negative before the hire date.
pub fn tenure_years(hire_date: NaiveDate, date: NaiveDate) -> Decimal {
    Decimal::from((date - hire_date).num_days()) / days_per_year()
}

/// Accrual rate of the highest tier reached at `tenure`.
///
/// Tenure below the first tier, including before the hire date, uses the
/// lowest tier.
pub fn accrual_rate(tiers: &[AccrualTier], tenure: Decimal) -> Decimal {
    tiers
        .iter()
        .rev()
        .find(|tier| tenure >= tier.min_years)
        .or_else(|| tiers.first())
        .map_or(Decimal::ZERO, |tier| tier.rate)
}

/// Walks every day of the priced segments and accumulates the totals.
pub fn accrue_year(
    priced: &[PricedSegment],
    daily_hours: Decimal,
    scheme: &SchemeConfig,
    accrual_tiers: &[AccrualTier],
    hire_date: NaiveDate,
) -> AccrualTotals {
    let pension = &scheme.pension;
    let insurance = &scheme.insurance;

    let mut state = AccrualState::default();
    let mut totals = AccrualTotals::default();

    for (date, day_gross) in daily_gross(priced, daily_hours) {
        let increment = state.advance(day_gross, pension, insurance);

        totals.insurance_premium = (totals.insurance_premium
            + increment.insurable * insurance.rate)
            .min(insurance.max_annual_premium);
        totals.pension_tier1 += increment.tier1 * pension.tier1_rate;
        totals.pension_tier2 += increment.tier2 * pension.tier2_rate;

        let rate = accrual_rate(accrual_tiers, tenure_years(hire_date, date));
        totals.pension_accrual += day_gross * rate;
    }

    totals.gross = state.cumulative_gross;
    totals
}
