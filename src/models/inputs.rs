//! Calculation inputs.
//!
//! Inputs arrive already validated for plausibility (non-negative hours,
//! minutes below sixty); the engine only clamps steps and checks that the
//! referenced tables and regions exist.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Aircraft, Seat, Step};

/// Inputs for a full annual compensation calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationInput {
    /// Crew seat.
    pub seat: Seat,
    /// Aircraft type flown.
    pub aircraft: Aircraft,
    /// Calendar year to calculate.
    pub year: i32,
    /// Step held on January 1 (ignored when `tie_step_to_year` is set).
    pub step: Step,
    /// Derive the step from the year instead of using `step`.
    #[serde(default)]
    pub tie_step_to_year: bool,
    /// Apply the special per-hour premium where the contract allows it.
    #[serde(default)]
    pub special_rate: bool,
    /// Average credited duty hours per month.
    pub avg_monthly_hours: Decimal,
    /// Province or territory code (e.g. "ON", "QC").
    pub region: String,
    /// Fraction of gross elected for the profit-share plan (0.05 = 5%).
    #[serde(default)]
    pub profit_share_percent: Decimal,
    /// Overrides the contract's reference hire date for tenure.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

/// Inputs for an overtime ("VO") valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeInput {
    /// Crew seat.
    pub seat: Seat,
    /// Aircraft type flown.
    pub aircraft: Aircraft,
    /// Table year whose rates apply.
    pub year: i32,
    /// Step held (ignored when `tie_step_to_year` is set).
    pub step: Step,
    /// Derive the step from the year instead of using `step`.
    #[serde(default)]
    pub tie_step_to_year: bool,
    /// Apply the special per-hour premium where the contract allows it.
    #[serde(default)]
    pub special_rate: bool,
    /// Province or territory code.
    pub region: String,
    /// Whole credit hours.
    pub credit_hours: u32,
    /// Credit minutes (0-59).
    #[serde(default)]
    pub credit_minutes: u32,
}
