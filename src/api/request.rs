//! Request types for the pilot compensation API.
//!
//! Requests carry raw numbers so plausibility can be checked before the
//! engine runs; [`AnnualRequest::validate`] and [`OvertimeRequest::validate`]
//! turn them into engine inputs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Aircraft, CompensationInput, OvertimeInput, Seat, Step};

/// Upper bound on average monthly hours: every hour of a 31-day month.
const MAX_MONTHLY_HOURS: i64 = 744;

/// Request body for the `/annual` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualRequest {
    /// Crew seat ("captain", "first_officer", "relief_pilot" or CA/FO/RP).
    pub seat: Seat,
    /// Aircraft code (e.g. "b777").
    pub aircraft: Aircraft,
    /// Calendar year to calculate.
    pub year: i32,
    /// Step held on January 1. Required unless the step is tied to the year.
    #[serde(default)]
    pub step: Option<u8>,
    /// Derive the step from the year.
    #[serde(default)]
    pub tie_step_to_year: bool,
    /// Apply the special per-hour premium.
    #[serde(default)]
    pub special_rate: bool,
    /// Average credited hours per month.
    pub avg_monthly_hours: Decimal,
    /// Region code.
    pub region: String,
    /// Fraction of gross elected for the profit-share plan.
    #[serde(default)]
    pub profit_share_percent: Decimal,
    /// Optional hire date for tenure-based accrual.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

impl AnnualRequest {
    /// Checks plausibility and converts to an engine input.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for hours outside 0-744, a negative
    /// profit-share percentage, or a missing or out-of-range step.
    pub fn validate(self) -> EngineResult<CompensationInput> {
        if self.avg_monthly_hours < Decimal::ZERO {
            return Err(invalid("avg_monthly_hours", "must not be negative"));
        }
        if self.avg_monthly_hours > Decimal::from(MAX_MONTHLY_HOURS) {
            return Err(invalid(
                "avg_monthly_hours",
                "must not exceed 744 (every hour of a 31-day month)",
            ));
        }
        if self.profit_share_percent < Decimal::ZERO {
            return Err(invalid("profit_share_percent", "must not be negative"));
        }
        let step = validate_step(self.step, self.tie_step_to_year)?;

        Ok(CompensationInput {
            seat: self.seat,
            aircraft: self.aircraft,
            year: self.year,
            step,
            tie_step_to_year: self.tie_step_to_year,
            special_rate: self.special_rate,
            avg_monthly_hours: self.avg_monthly_hours,
            region: self.region,
            profit_share_percent: self.profit_share_percent,
            hire_date: self.hire_date,
        })
    }
}

/// Request body for the `/overtime` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Crew seat.
    pub seat: Seat,
    /// Aircraft code.
    pub aircraft: Aircraft,
    /// Table year whose rates apply.
    pub year: i32,
    /// Step held. Required unless the step is tied to the year.
    #[serde(default)]
    pub step: Option<u8>,
    /// Derive the step from the year.
    #[serde(default)]
    pub tie_step_to_year: bool,
    /// Apply the special per-hour premium.
    #[serde(default)]
    pub special_rate: bool,
    /// Region code.
    pub region: String,
    /// Whole credit hours.
    pub credit_hours: u32,
    /// Credit minutes (0-59).
    #[serde(default)]
    pub credit_minutes: u32,
}

impl OvertimeRequest {
    /// Checks plausibility and converts to an engine input.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for minutes outside 0-59 or a missing or
    /// out-of-range step.
    pub fn validate(self) -> EngineResult<OvertimeInput> {
        if self.credit_minutes >= 60 {
            return Err(invalid("credit_minutes", "must be between 0 and 59"));
        }
        let step = validate_step(self.step, self.tie_step_to_year)?;

        Ok(OvertimeInput {
            seat: self.seat,
            aircraft: self.aircraft,
            year: self.year,
            step,
            tie_step_to_year: self.tie_step_to_year,
            special_rate: self.special_rate,
            region: self.region,
            credit_hours: self.credit_hours,
            credit_minutes: self.credit_minutes,
        })
    }
}

fn validate_step(step: Option<u8>, tie_step_to_year: bool) -> EngineResult<Step> {
    match (step, tie_step_to_year) {
        (_, true) => Ok(Step::MIN),
        (Some(value), false) if (Step::MIN.get()..=Step::MAX.get()).contains(&value) => {
            Ok(Step::from(value))
        }
        (Some(_), false) => Err(invalid("step", "must be between 1 and 12")),
        (None, false) => Err(invalid(
            "step",
            "is required unless tie_step_to_year is set",
        )),
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: message.to_string(),
    }
}
