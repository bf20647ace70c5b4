//! Calculation result models.
//!
//! [`AnnualResult`] and [`OvertimeResult`] are produced fresh for every
//! request and never persisted. Both are pure functions of their inputs and
//! the loaded configuration: they carry no identifiers or timestamps, so two
//! identical requests yield equal results. The API layer wraps them with a
//! calculation id when responding.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Aircraft, AuditStep, Seat, Step};

/// One pay-rate-consistent date range of the calculation year.
///
/// # Example
///
/// ```
/// use pilot_pay_engine::models::{SegmentLine, Step};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let line = SegmentLine {
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 9, 29).unwrap(),
///     table_year: 2024,
///     step: Step::clamped(4),
///     days: 272,
///     hours: Decimal::new(67023, 2),
///     rate: Decimal::new(41000, 2),
///     gross: Decimal::new(27479430, 2),
/// };
/// assert_eq!(line.table_year, 2024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentLine {
    /// First day of the segment.
    pub start_date: NaiveDate,
    /// Last day of the segment (inclusive).
    pub end_date: NaiveDate,
    /// Pay table year applied.
    pub table_year: i32,
    /// Step applied.
    pub step: Step,
    /// Calendar days in the segment.
    pub days: u32,
    /// Credited hours in the segment.
    pub hours: Decimal,
    /// Hourly rate applied.
    pub rate: Decimal,
    /// Segment gross (hours x rate).
    pub gross: Decimal,
}

/// Two-tier pension-plan contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionContribution {
    /// Base contribution (exemption floor to first ceiling).
    pub tier1: Decimal,
    /// Supplementary contribution (first to second ceiling).
    pub tier2: Decimal,
    /// Sum of both tiers.
    pub total: Decimal,
}

/// Income tax split by jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Income the tax was computed on.
    pub taxable_income: Decimal,
    /// Federal tax after credits, floored at zero.
    pub federal: Decimal,
    /// Provincial tax after credits, floored at zero.
    pub provincial: Decimal,
    /// Federal plus provincial.
    pub total: Decimal,
    /// Federal marginal rate at the taxable income.
    pub federal_marginal_rate: Decimal,
    /// Provincial marginal rate at the taxable income.
    pub provincial_marginal_rate: Decimal,
}

/// Profit-share plan contribution and employer match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitShare {
    /// Elected fraction after capping.
    pub percent: Decimal,
    /// Employee contribution.
    pub contribution: Decimal,
    /// Employer match before tax.
    pub employer_match: Decimal,
    /// Employer match after tax at the combined marginal rate.
    pub employer_match_after_tax: Decimal,
}

/// Gross pay and dues for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyDues {
    /// Month number (1-12).
    pub month: u32,
    /// Gross earned in the month.
    pub gross: Decimal,
    /// Dues for the month, rounded to cents.
    pub dues: Decimal,
}

/// Annual figures spread evenly over twelve months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    /// Gross per month.
    pub gross: Decimal,
    /// Income tax per month.
    pub income_tax: Decimal,
    /// Pension-plan contribution per month.
    pub pension_contribution: Decimal,
    /// Insurance premium per month.
    pub insurance_premium: Decimal,
    /// Health premium per month.
    pub health_premium: Decimal,
    /// Pension accrual per month.
    pub pension_accrual: Decimal,
    /// Union dues per month.
    pub union_dues: Decimal,
    /// Take-home pay per month, excluding profit share and its match.
    pub take_home: Decimal,
}

/// The complete result of an annual compensation calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualResult {
    /// Crew seat.
    pub seat: Seat,
    /// Aircraft type.
    pub aircraft: Aircraft,
    /// Calculation year.
    pub year: i32,
    /// Region code.
    pub region: String,
    /// Step held on January 1.
    pub starting_step: Step,
    /// Credited hours for the year.
    pub hours: Decimal,
    /// Annual gross pay.
    pub gross: Decimal,
    /// Pension-plan contribution.
    pub pension_contribution: PensionContribution,
    /// Insurance premium, never above the annual maximum.
    pub insurance_premium: Decimal,
    /// Fixed regional health premium.
    pub health_premium: Decimal,
    /// Tenure-based pension accrual, deducted before tax.
    pub pension_accrual: Decimal,
    /// Income tax.
    pub tax: TaxBreakdown,
    /// Profit-share contribution and match.
    pub profit_share: ProfitShare,
    /// Annual union dues (sum of the monthly dues).
    pub union_dues: Decimal,
    /// Annual net pay.
    pub net: Decimal,
    /// Monthly view of the annual figures.
    pub monthly: MonthlyBreakdown,
    /// Gross and dues per calendar month.
    pub union_dues_by_month: Vec<MonthlyDues>,
    /// Pay-rate segments, in date order.
    pub segments: Vec<SegmentLine>,
    /// Ordered audit trail.
    pub audit_steps: Vec<AuditStep>,
}

/// The result of an overtime valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeResult {
    /// Crew seat.
    pub seat: Seat,
    /// Aircraft type.
    pub aircraft: Aircraft,
    /// Table year.
    pub year: i32,
    /// Step applied.
    pub step: Step,
    /// Credit converted to paid duty hours.
    pub duty_hours: Decimal,
    /// Hourly rate applied.
    pub rate: Decimal,
    /// Gross overtime pay.
    pub gross: Decimal,
    /// Federal marginal rate at the gross.
    pub federal_marginal_rate: Decimal,
    /// Provincial marginal rate at the gross.
    pub provincial_marginal_rate: Decimal,
    /// Gross less tax at the combined marginal rate.
    pub estimated_net: Decimal,
}
