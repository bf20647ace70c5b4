//! Annual compensation aggregation.
//!
//! Orchestrates step resolution, date segmentation, rate resolution, the
//! daily accrual walk, union dues, income tax and the profit-share plan into
//! one [`AnnualResult`] with an ordered audit trail.

use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;

use crate::config::{ContractConfig, ProfitShareConfig};
use crate::error::EngineResult;
use crate::models::{
    AnnualResult, AuditLog, CompensationInput, MonthlyBreakdown, PensionContribution, ProfitShare,
    SegmentLine, round_cents,
};

use super::daily_accrual::accrue_year;
use super::daily_walk::{daily_hours, price_segments};
use super::date_segments::{segment_year, starting_step};
use super::rate_resolver::RateResolver;
use super::tax::income_tax;
use super::union_dues::union_dues;

/// Calculates annual and monthly compensation for one pilot.
///
/// # Errors
///
/// Returns a lookup error if the region is unknown, if any segment's table
/// year has no table, or if a Relief Pilot is requested on an ineligible
/// aircraft. No partial result is produced.
///
/// # Example
///
/// ```no_run
/// use pilot_pay_engine::calculation::calculate_annual;
/// use pilot_pay_engine::config::ConfigLoader;
/// use pilot_pay_engine::models::{Aircraft, CompensationInput, Seat, Step};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/contract")?;
/// let input = CompensationInput {
///     seat: Seat::Captain,
///     aircraft: Aircraft::B777,
///     year: 2026,
///     step: Step::clamped(8),
///     tie_step_to_year: false,
///     special_rate: false,
///     avg_monthly_hours: Decimal::from(75),
///     region: "ON".to_string(),
///     profit_share_percent: Decimal::new(5, 2),
///     hire_date: None,
/// };
/// let result = calculate_annual(&input, loader.config())?;
/// println!("Net: ${}", result.net);
/// # Ok::<(), pilot_pay_engine::error::EngineError>(())
/// ```
pub fn calculate_annual(
    input: &CompensationInput,
    config: &ContractConfig,
) -> EngineResult<AnnualResult> {
    let terms = config.terms();
    let deductions = config.deductions();
    let region = deductions.region(&input.region)?;
    let mut audit = AuditLog::new();

    let step = starting_step(input.year, input.step, input.tie_step_to_year, terms.base_year);
    audit.record(
        "starting_step",
        "Starting Step",
        "Step progression",
        json!({
            "year": input.year,
            "selected_step": input.step,
            "tie_step_to_year": input.tie_step_to_year,
            "base_year": terms.base_year,
        }),
        json!({ "step": step }),
        if input.tie_step_to_year {
            format!("Step tied to year: ({} - {}) + 1, clamped to 1-12", input.year, terms.base_year)
        } else {
            "Selected step used as held on January 1".to_string()
        },
    );

    let segments = segment_year(input.year, step, terms)?;
    let resolver = RateResolver::new(config);
    let priced = price_segments(
        &resolver,
        input.seat,
        input.aircraft,
        input.special_rate,
        &segments,
    )?;
    let per_day = daily_hours(input.avg_monthly_hours);

    let mut hours = Decimal::ZERO;
    let mut gross = Decimal::ZERO;
    let mut lines = Vec::with_capacity(priced.len());
    for priced_segment in &priced {
        let segment = priced_segment.segment;
        let segment_hours = priced_segment.hours(per_day);
        let segment_gross = priced_segment.gross(per_day);
        hours += segment_hours;
        gross += segment_gross;

        let line = SegmentLine {
            start_date: segment.start,
            end_date: segment.end,
            table_year: segment.table_year,
            step: segment.step,
            days: segment.days(),
            hours: round_cents(segment_hours),
            rate: priced_segment.rate,
            gross: round_cents(segment_gross),
        };
        audit.record(
            "segment_rate",
            "Segment Rate",
            "Pay tables",
            json!({
                "start_date": line.start_date,
                "end_date": line.end_date,
                "table_year": line.table_year,
                "step": line.step,
                "special_rate": input.special_rate,
            }),
            json!({
                "rate": line.rate.normalize().to_string(),
                "hours": line.hours.normalize().to_string(),
                "gross": line.gross.normalize().to_string(),
            }),
            format!(
                "{} days at {} {} rates, table {} step {}",
                line.days, input.aircraft, input.seat, line.table_year, line.step
            ),
        );
        lines.push(line);
    }
    let gross = round_cents(gross);

    let scheme = deductions.scheme(region.scheme);
    let hire_date = input.hire_date.unwrap_or(terms.hire_date);
    let accruals = accrue_year(&priced, per_day, scheme, &terms.pension_accrual, hire_date);
    let pension_contribution = PensionContribution {
        tier1: round_cents(accruals.pension_tier1),
        tier2: round_cents(accruals.pension_tier2),
        total: round_cents(accruals.pension_tier1) + round_cents(accruals.pension_tier2),
    };
    let insurance_premium = round_cents(accruals.insurance_premium);
    let pension_accrual = round_cents(accruals.pension_accrual);
    audit.record(
        "daily_accrual",
        "Daily Contribution Accrual",
        "Statutory contributions",
        json!({
            "daily_hours": per_day.round_dp(4).normalize().to_string(),
            "scheme": region.scheme,
            "hire_date": hire_date,
        }),
        json!({
            "pension_tier1": pension_contribution.tier1.normalize().to_string(),
            "pension_tier2": pension_contribution.tier2.normalize().to_string(),
            "insurance_premium": insurance_premium.normalize().to_string(),
            "pension_accrual": pension_accrual.normalize().to_string(),
        }),
        "Contributions accrued day by day on cumulative gross against annual ceilings".to_string(),
    );

    let dues = union_dues(&priced, per_day, terms.union_dues_rate);
    audit.record(
        "union_dues",
        "Union Dues",
        "Union dues",
        json!({ "rate": terms.union_dues_rate.normalize().to_string() }),
        json!({ "annual": dues.total.normalize().to_string() }),
        "Monthly gross times the dues rate, rounded per month".to_string(),
    );

    let taxable_income = (gross - pension_accrual).max(Decimal::ZERO);
    let contributions_for_credit = pension_contribution.total + insurance_premium;
    let tax = income_tax(taxable_income, contributions_for_credit, deductions, region);
    audit.record(
        "income_tax",
        "Income Tax",
        "Federal and provincial brackets",
        json!({
            "taxable_income": tax.taxable_income.normalize().to_string(),
            "contributions": contributions_for_credit.normalize().to_string(),
            "region": input.region,
        }),
        json!({
            "federal": tax.federal.normalize().to_string(),
            "provincial": tax.provincial.normalize().to_string(),
            "total": tax.total.normalize().to_string(),
        }),
        "Bracket tax less basic personal amount and contribution credits".to_string(),
    );

    let profit_share = profit_share(
        gross,
        input.profit_share_percent,
        &terms.profit_share,
        tax.federal_marginal_rate + tax.provincial_marginal_rate,
    );
    audit.record(
        "profit_share",
        "Profit Share",
        "Profit-share plan",
        json!({
            "elected_percent": input.profit_share_percent.normalize().to_string(),
            "max_percent": terms.profit_share.max_percent.normalize().to_string(),
            "annual_ceiling": terms.profit_share.annual_ceiling.normalize().to_string(),
        }),
        json!({
            "contribution": profit_share.contribution.normalize().to_string(),
            "employer_match_after_tax": profit_share.employer_match_after_tax.normalize().to_string(),
        }),
        "Employer match valued at the combined marginal rate".to_string(),
    );

    let health_premium = region.health_premium;
    let recurring_deductions = tax.total
        + pension_contribution.total
        + pension_accrual
        + insurance_premium
        + health_premium
        + dues.total;
    let net = gross - recurring_deductions - profit_share.contribution
        + profit_share.employer_match_after_tax;

    let monthly = monthly_breakdown(
        gross,
        tax.total,
        &pension_contribution,
        insurance_premium,
        health_premium,
        pension_accrual,
        dues.total,
        gross - recurring_deductions,
    );
    audit.record(
        "net_pay",
        "Net Pay",
        "Summary",
        json!({
            "gross": gross.normalize().to_string(),
            "deductions": recurring_deductions.normalize().to_string(),
        }),
        json!({
            "net": net.normalize().to_string(),
            "monthly_take_home": monthly.take_home.normalize().to_string(),
        }),
        "Gross less tax, contributions, premiums and dues, plus the after-tax match".to_string(),
    );

    debug!(
        seat = %input.seat,
        aircraft = %input.aircraft,
        year = input.year,
        step = %step,
        gross = %gross,
        net = %net,
        "Calculated annual compensation"
    );

    Ok(AnnualResult {
        seat: input.seat,
        aircraft: input.aircraft,
        year: input.year,
        region: input.region.clone(),
        starting_step: step,
        hours: round_cents(hours),
        gross,
        pension_contribution,
        insurance_premium,
        health_premium,
        pension_accrual,
        tax,
        profit_share,
        union_dues: dues.total,
        net,
        monthly,
        union_dues_by_month: dues.months,
        segments: lines,
        audit_steps: audit.into_steps(),
    })
}

/// Profit-share contribution capped by percentage and ceiling, with the
/// employer match valued after tax.
fn profit_share(
    gross: Decimal,
    elected_percent: Decimal,
    plan: &ProfitShareConfig,
    combined_marginal_rate: Decimal,
) -> ProfitShare {
    let percent = elected_percent.clamp(Decimal::ZERO, plan.max_percent);
    let contribution = round_cents((gross * percent).min(plan.annual_ceiling));
    let employer_match = round_cents(contribution * plan.employer_match);
    let employer_match_after_tax =
        round_cents(employer_match * (Decimal::ONE - combined_marginal_rate));
    ProfitShare {
        percent,
        contribution,
        employer_match,
        employer_match_after_tax,
    }
}

#[allow(clippy::too_many_arguments)]
fn monthly_breakdown(
    gross: Decimal,
    income_tax: Decimal,
    pension: &PensionContribution,
    insurance_premium: Decimal,
    health_premium: Decimal,
    pension_accrual: Decimal,
    union_dues: Decimal,
    take_home: Decimal,
) -> MonthlyBreakdown {
    let per_month = |amount: Decimal| round_cents(amount / Decimal::from(12));
    MonthlyBreakdown {
        gross: per_month(gross),
        income_tax: per_month(income_tax),
        pension_contribution: per_month(pension.total),
        insurance_premium: per_month(insurance_premium),
        health_premium: per_month(health_premium),
        pension_accrual: per_month(pension_accrual),
        union_dues: per_month(union_dues),
        take_home: per_month(take_home),
    }
}
