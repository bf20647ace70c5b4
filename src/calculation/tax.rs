//! Federal and provincial income tax.
//!
//! Both jurisdictions use a marginal-bracket walk followed by non-refundable
//! credits at the jurisdiction's lowest rate:
//!
//! - Federal: `lowest federal rate x (phased basic personal amount + contributions)`
//! - Provincial: `lowest regional rate x (regional basic personal amount + contributions)`
//!
//! Each jurisdiction's tax is floored at zero on its own.

use rust_decimal::Decimal;

use crate::config::{BasicPersonalAmount, DeductionsConfig, FederalTaxConfig, RegionConfig, TaxBracket};
use crate::models::{round_cents, TaxBreakdown};

/// Tax on `income` from an ascending bracket table.
///
/// ```
/// use pilot_pay_engine::calculation::bracket_tax;
/// use pilot_pay_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let brackets = vec![
///     TaxBracket { upper: Some(Decimal::from(50_000)), rate: Decimal::new(10, 2) },
///     TaxBracket { upper: None, rate: Decimal::new(20, 2) },
/// ];
/// assert_eq!(bracket_tax(Decimal::from(60_000), &brackets), Decimal::from(7_000));
/// ```
pub fn bracket_tax(income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut previous = Decimal::ZERO;

    for bracket in brackets {
        if income <= previous {
            break;
        }
        let top = bracket.upper.map_or(income, |upper| income.min(upper));
        tax += (top - previous) * bracket.rate;
        match bracket.upper {
            Some(upper) => previous = upper,
            None => break,
        }
    }

    tax
}

/// Rate of the bracket `income` falls in. Income equal to a threshold
/// belongs to the lower bracket.
pub fn marginal_rate(income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    brackets
        .iter()
        .find(|bracket| bracket.upper.is_none_or(|upper| income <= upper))
        .or_else(|| brackets.last())
        .map_or(Decimal::ZERO, |bracket| bracket.rate)
}

fn lowest_rate(brackets: &[TaxBracket]) -> Decimal {
    brackets.first().map_or(Decimal::ZERO, |bracket| bracket.rate)
}

/// Federal basic personal amount at `income`, phased down linearly from the
/// maximum to the minimum between the two thresholds.
pub fn federal_basic_personal_amount(income: Decimal, bpa: &BasicPersonalAmount) -> Decimal {
    if income <= bpa.phase_out_start {
        return bpa.maximum;
    }
    if income >= bpa.phase_out_end {
        return bpa.minimum;
    }
    let progress = (income - bpa.phase_out_start) / (bpa.phase_out_end - bpa.phase_out_start);
    bpa.maximum - (bpa.maximum - bpa.minimum) * progress
}

/// Federal tax after credits, unrounded.
///
/// `contributions` is the pension-plan contribution plus the insurance
/// premium.
pub fn federal_tax(income: Decimal, contributions: Decimal, federal: &FederalTaxConfig) -> Decimal {
    let gross_tax = bracket_tax(income, &federal.brackets);
    let bpa = federal_basic_personal_amount(income, &federal.basic_personal_amount);
    let credits = lowest_rate(&federal.brackets) * (bpa + contributions);
    (gross_tax - credits).max(Decimal::ZERO)
}

/// Provincial tax after credits, unrounded.
pub fn provincial_tax(income: Decimal, contributions: Decimal, region: &RegionConfig) -> Decimal {
    let gross_tax = bracket_tax(income, &region.brackets);
    let credits = lowest_rate(&region.brackets) * (region.basic_personal_amount + contributions);
    (gross_tax - credits).max(Decimal::ZERO)
}

/// Full income tax with marginal rates, rounded to cents.
pub fn income_tax(
    taxable_income: Decimal,
    contributions: Decimal,
    deductions: &DeductionsConfig,
    region: &RegionConfig,
) -> TaxBreakdown {
    let federal = round_cents(federal_tax(taxable_income, contributions, &deductions.federal));
    let provincial = round_cents(provincial_tax(taxable_income, contributions, region));

    TaxBreakdown {
        taxable_income: round_cents(taxable_income),
        federal,
        provincial,
        total: federal + provincial,
        federal_marginal_rate: marginal_rate(taxable_income, &deductions.federal.brackets),
        provincial_marginal_rate: marginal_rate(taxable_income, &region.brackets),
    }
}
