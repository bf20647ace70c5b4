//! Calculation logic for the pilot compensation engine.
//!
//! This module contains the date segmentation of a year around the contract's
//! rate-switch and step-progression dates, hourly rate resolution, the
//! day-by-day accrual of statutory contributions, income tax, union dues,
//! the annual aggregator, and the overtime valuation.

mod annual;
mod daily_accrual;
mod daily_walk;
mod date_segments;
mod overtime;
mod rate_resolver;
mod tax;
mod union_dues;

#[cfg(test)]
pub(crate) mod fixtures;

pub use annual::calculate_annual;
pub use daily_accrual::{
    AccrualState, AccrualTotals, accrual_rate, accrue_year, tenure_years,
};
pub use daily_walk::{PricedSegment, daily_gross, daily_hours, days_per_year, price_segments};
pub use date_segments::{DateSegment, segment_year, starting_step};
pub use overtime::{calculate_overtime, credit_to_duty_hours};
pub use rate_resolver::RateResolver;
pub use tax::{
    bracket_tax, federal_basic_personal_amount, federal_tax, income_tax, marginal_rate,
    provincial_tax,
};
pub use union_dues::{UnionDues, union_dues};
