//! Overtime ("VO") valuation.
//!
//! A quick single-rate estimate: credit time is converted to duty hours,
//! priced at one rate, and taxed at the marginal rates only.

use rust_decimal::Decimal;

use crate::config::ContractConfig;
use crate::error::EngineResult;
use crate::models::{OvertimeInput, OvertimeResult, round_cents};

use super::date_segments::starting_step;
use super::rate_resolver::RateResolver;
use super::tax::marginal_rate;

/// Converts a credit of hours and minutes to paid duty hours.
///
/// ```
/// use pilot_pay_engine::calculation::credit_to_duty_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(credit_to_duty_hours(2, 30, Decimal::from(2)), Decimal::from(5));
/// ```
pub fn credit_to_duty_hours(hours: u32, minutes: u32, multiplier: Decimal) -> Decimal {
    (Decimal::from(hours) + Decimal::from(minutes) / Decimal::from(60)) * multiplier
}

/// Values an overtime credit.
///
/// # Errors
///
/// Returns a lookup error for an unknown region, a missing table year, or a
/// Relief Pilot on an ineligible aircraft.
pub fn calculate_overtime(
    input: &OvertimeInput,
    config: &ContractConfig,
) -> EngineResult<OvertimeResult> {
    let terms = config.terms();
    let deductions = config.deductions();
    let region = deductions.region(&input.region)?;

    let step = starting_step(input.year, input.step, input.tie_step_to_year, terms.base_year);
    let rate = RateResolver::new(config).rate(
        input.seat,
        input.aircraft,
        input.year,
        step,
        input.special_rate,
    )?;

    let duty_hours = credit_to_duty_hours(
        input.credit_hours,
        input.credit_minutes,
        terms.overtime_credit_multiplier,
    );
    let gross = round_cents(duty_hours * rate);

    let federal_marginal_rate = marginal_rate(gross, &deductions.federal.brackets);
    let provincial_marginal_rate = marginal_rate(gross, &region.brackets);
    let estimated_net =
        round_cents(gross * (Decimal::ONE - federal_marginal_rate - provincial_marginal_rate));

    Ok(OvertimeResult {
        seat: input.seat,
        aircraft: input.aircraft,
        year: input.year,
        step,
        duty_hours: duty_hours.round_dp(4),
        rate,
        gross,
        federal_marginal_rate,
        provincial_marginal_rate,
        estimated_net,
    })
}
