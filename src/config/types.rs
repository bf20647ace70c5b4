//! Configuration types for the pilot compensation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a contract directory, plus the
//! [`ContractConfig`] aggregate that owns the built pay-table registry.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Aircraft, Fleet};
use crate::pay_table::{PayTable, PayTableRegistry};

/// A calendar month and day that recurs every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    /// Month (1-12).
    pub month: u32,
    /// Day of month.
    pub day: u32,
}

impl MonthDay {
    /// Returns this month and day in `year`.
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    fn validate(self, name: &str) -> EngineResult<()> {
        // 2023 is not a leap year, so February 29 is rejected here.
        if self.in_year(2023).is_none() || (self.month == 1 && self.day == 1) {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "{} must be a valid date after January 1 in every year, got {}-{}",
                    name, self.month, self.day
                ),
            });
        }
        Ok(())
    }
}

/// Forecast-year projection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Compounding yearly raise applied past the last published table.
    pub raise_factor: Decimal,
    /// Last year to project.
    pub horizon_year: i32,
}

/// Fractions of the Captain step-12 rate used to anchor steps 3-12.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchoringConfig {
    /// First Officer curve for narrow-body aircraft.
    pub first_officer_narrow_body: [Decimal; 10],
    /// First Officer curve for wide-body aircraft.
    pub first_officer_wide_body: [Decimal; 10],
    /// Relief Pilot curve, identical for every eligible aircraft.
    pub relief_pilot: [Decimal; 10],
    /// Discount off step 5 that floors Relief Pilot steps 1-4.
    pub relief_pilot_low_step_discount: Decimal,
}

impl AnchoringConfig {
    /// Returns the First Officer curve for a fleet.
    pub fn first_officer_curve(&self, fleet: Fleet) -> &[Decimal; 10] {
        match fleet {
            Fleet::NarrowBody => &self.first_officer_narrow_body,
            Fleet::WideBody => &self.first_officer_wide_body,
        }
    }
}

/// The special per-hour premium for one aircraft type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRateConfig {
    /// Aircraft the premium applies to.
    pub aircraft: Aircraft,
    /// Premium added to the hourly rate.
    pub premium_per_hour: Decimal,
}

/// A tenure band of the pension accrual schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualTier {
    /// Years of service at which the band starts.
    pub min_years: Decimal,
    /// Fraction of daily gross accrued.
    pub rate: Decimal,
}

/// Profit-share plan limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitShareConfig {
    /// Highest electable fraction of gross.
    pub max_percent: Decimal,
    /// Annual contribution ceiling.
    pub annual_ceiling: Decimal,
    /// Employer match as a fraction of the contribution.
    pub employer_match: Decimal,
}

/// Contract terms from `contract.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTerms {
    /// Agreement code.
    pub code: String,
    /// Human-readable agreement name.
    pub name: String,
    /// Version or ratification date.
    pub version: String,
    /// Year whose tied step is 1.
    pub base_year: i32,
    /// Date new table rates take effect each year.
    pub rate_switch: MonthDay,
    /// Date every pilot advances one step.
    pub step_progression: MonthDay,
    /// Reference hire date for tenure-based accrual.
    pub hire_date: NaiveDate,
    /// Forecast projection.
    pub projection: ProjectionConfig,
    /// Forecast anchoring curves.
    pub anchoring: AnchoringConfig,
    /// Special per-hour premium.
    pub special_rate: SpecialRateConfig,
    /// Pension accrual tenure bands.
    pub pension_accrual: Vec<AccrualTier>,
    /// Profit-share plan.
    pub profit_share: ProfitShareConfig,
    /// Union dues as a fraction of monthly gross.
    pub union_dues_rate: Decimal,
    /// Duty hours paid per overtime credit hour.
    pub overtime_credit_multiplier: Decimal,
}

impl ContractTerms {
    fn validate(&self) -> EngineResult<()> {
        self.rate_switch.validate("rate_switch")?;
        self.step_progression.validate("step_progression")?;
        let ordered = (self.rate_switch.month, self.rate_switch.day)
            < (self.step_progression.month, self.step_progression.day);
        if !ordered {
            return Err(EngineError::InvalidConfig {
                message: "rate_switch must fall before step_progression".to_string(),
            });
        }

        let tiers_ascending = self
            .pension_accrual
            .windows(2)
            .all(|pair| pair[0].min_years < pair[1].min_years);
        if self.pension_accrual.is_empty() || !tiers_ascending {
            return Err(EngineError::InvalidConfig {
                message: "pension_accrual tiers must be non-empty and ascending".to_string(),
            });
        }
        Ok(())
    }
}

/// One marginal tax bracket. `upper` is `None` for the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper income threshold of the bracket.
    pub upper: Option<Decimal>,
    /// Marginal rate within the bracket.
    pub rate: Decimal,
}

/// Federal basic personal amount with its high-income phase-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicPersonalAmount {
    /// Amount at or below `phase_out_start`.
    pub maximum: Decimal,
    /// Amount at or above `phase_out_end`.
    pub minimum: Decimal,
    /// Income where the phase-out begins.
    pub phase_out_start: Decimal,
    /// Income where the phase-out completes.
    pub phase_out_end: Decimal,
}

/// Federal income tax rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalTaxConfig {
    /// Marginal brackets, ascending.
    pub brackets: Vec<TaxBracket>,
    /// Basic personal amount.
    pub basic_personal_amount: BasicPersonalAmount,
}

/// Which parallel set of contribution rates a region uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionScheme {
    /// National pension and insurance rates.
    Standard,
    /// Quebec's own pension plan and reduced insurance rate.
    Quebec,
}

/// Two-tier pension plan parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionPlanConfig {
    /// Earnings below this floor are exempt.
    pub basic_exemption: Decimal,
    /// Upper limit of tier-1 earnings.
    pub first_ceiling: Decimal,
    /// Upper limit of tier-2 earnings.
    pub second_ceiling: Decimal,
    /// Tier-1 contribution rate.
    pub tier1_rate: Decimal,
    /// Tier-2 contribution rate.
    pub tier2_rate: Decimal,
}

/// Employment insurance parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceConfig {
    /// Annual maximum insurable earnings.
    pub max_insurable_earnings: Decimal,
    /// Premium rate.
    pub rate: Decimal,
    /// Annual premium cap.
    pub max_annual_premium: Decimal,
}

/// Pension and insurance rates of one scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeConfig {
    /// Pension plan.
    pub pension: PensionPlanConfig,
    /// Employment insurance.
    pub insurance: InsuranceConfig,
}

/// Both contribution schemes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemesConfig {
    /// Rates outside Quebec.
    pub standard: SchemeConfig,
    /// Rates inside Quebec.
    pub quebec: SchemeConfig,
}

/// A province or territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Human-readable name.
    pub name: String,
    /// Contribution scheme.
    pub scheme: ContributionScheme,
    /// Fixed annual health premium.
    pub health_premium: Decimal,
    /// Provincial basic personal amount.
    pub basic_personal_amount: Decimal,
    /// Provincial marginal brackets, ascending.
    pub brackets: Vec<TaxBracket>,
}

/// Statutory deduction rules from `deductions.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionsConfig {
    /// The tax year the rules come from.
    pub tax_year: i32,
    /// Federal tax.
    pub federal: FederalTaxConfig,
    /// Contribution schemes.
    pub schemes: SchemesConfig,
    /// Regions by code.
    pub regions: HashMap<String, RegionConfig>,
}

impl DeductionsConfig {
    /// Returns the rates of a contribution scheme.
    pub fn scheme(&self, scheme: ContributionScheme) -> &SchemeConfig {
        match scheme {
            ContributionScheme::Standard => &self.schemes.standard,
            ContributionScheme::Quebec => &self.schemes.quebec,
        }
    }

    /// Returns a region by code.
    pub fn region(&self, code: &str) -> EngineResult<&RegionConfig> {
        self.regions
            .get(code)
            .ok_or_else(|| EngineError::RegionNotFound {
                code: code.to_string(),
            })
    }

    fn validate(&self) -> EngineResult<()> {
        validate_brackets("federal", &self.federal.brackets)?;
        for (code, region) in &self.regions {
            validate_brackets(code, &region.brackets)?;
        }
        let bpa = &self.federal.basic_personal_amount;
        if bpa.phase_out_start >= bpa.phase_out_end || bpa.minimum > bpa.maximum {
            return Err(EngineError::InvalidConfig {
                message: "federal basic personal amount phase-out is inverted".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_brackets(owner: &str, brackets: &[TaxBracket]) -> EngineResult<()> {
    let invalid = |reason: &str| EngineError::InvalidConfig {
        message: format!("{} brackets {}", owner, reason),
    };

    let Some((top, lower)) = brackets.split_last() else {
        return Err(invalid("must not be empty"));
    };
    if top.upper.is_some() {
        return Err(invalid("must end with an open-ended bracket"));
    }

    let mut previous = Decimal::ZERO;
    for bracket in lower {
        match bracket.upper {
            Some(upper) if upper > previous => previous = upper,
            Some(_) => return Err(invalid("must have ascending thresholds")),
            None => return Err(invalid("may only leave the top bracket open-ended")),
        }
    }
    Ok(())
}

/// The complete contract configuration.
///
/// Owns the contract terms, the deduction rules, and the pay-table registry
/// built from the published tables. Construct it with [`ContractConfig::new`]
/// to inject fake tables in tests.
#[derive(Debug, Clone)]
pub struct ContractConfig {
    terms: ContractTerms,
    deductions: DeductionsConfig,
    registry: PayTableRegistry,
}

impl ContractConfig {
    /// Validates the configuration and builds the pay-table registry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any structural rule is violated.
    pub fn new(
        terms: ContractTerms,
        deductions: DeductionsConfig,
        published: Vec<PayTable>,
    ) -> EngineResult<Self> {
        terms.validate()?;
        deductions.validate()?;
        let registry = PayTableRegistry::build(published, &terms.projection, &terms.anchoring)?;
        Ok(Self {
            terms,
            deductions,
            registry,
        })
    }

    /// Returns the contract terms.
    pub fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    /// Returns the deduction rules.
    pub fn deductions(&self) -> &DeductionsConfig {
        &self.deductions
    }

    /// Returns the pay-table registry.
    pub fn registry(&self) -> &PayTableRegistry {
        &self.registry
    }
}
