//! Small in-memory contract used by the calculation unit tests.
//!
//! Tables are published for 2024-2026 with round numbers and projected
//! through 2030. Captain B777 step 12 is 400.00 in 2024, 420.00 in 2025 and
//! 440.00 in 2026.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::{ContractConfig, ContractTerms, DeductionsConfig};
use crate::models::Aircraft;
use crate::pay_table::{PayTable, SeatRows, StepLadder, TableSource};

const TERMS_YAML: &str = r#"
code: "TEST"
name: "Test Agreement"
version: "test"
base_year: 2024
rate_switch: { month: 9, day: 30 }
step_progression: { month: 11, day: 1 }
hire_date: 2024-11-01
projection:
  raise_factor: 1.03
  horizon_year: 2030
anchoring:
  first_officer_narrow_body: [0.43, 0.47, 0.51, 0.55, 0.58, 0.61, 0.63, 0.65, 0.67, 0.68]
  first_officer_wide_body: [0.41, 0.45, 0.49, 0.52, 0.55, 0.58, 0.61, 0.64, 0.66, 0.67]
  relief_pilot: [0.38, 0.42, 0.46, 0.49, 0.52, 0.55, 0.57, 0.59, 0.60, 0.61]
  relief_pilot_low_step_discount: 0.05
special_rate:
  aircraft: a220
  premium_per_hour: 11.75
pension_accrual:
  - { min_years: 0, rate: 0.04 }
  - { min_years: 2, rate: 0.05 }
  - { min_years: 5, rate: 0.06 }
profit_share:
  max_percent: 0.10
  annual_ceiling: 15000
  employer_match: 0.50
union_dues_rate: 0.0195
overtime_credit_multiplier: 2
"#;

const DEDUCTIONS_YAML: &str = r#"
tax_year: 2025
federal:
  brackets:
    - { upper: 57375, rate: 0.15 }
    - { upper: 114750, rate: 0.205 }
    - { upper: 177882, rate: 0.26 }
    - { upper: 253414, rate: 0.29 }
    - { upper: null, rate: 0.33 }
  basic_personal_amount:
    maximum: 16129
    minimum: 14538
    phase_out_start: 177882
    phase_out_end: 253414
schemes:
  standard:
    pension: { basic_exemption: 3500, first_ceiling: 71300, second_ceiling: 81200, tier1_rate: 0.0595, tier2_rate: 0.04 }
    insurance: { max_insurable_earnings: 65700, rate: 0.0164, max_annual_premium: 1077.48 }
  quebec:
    pension: { basic_exemption: 3500, first_ceiling: 71300, second_ceiling: 81200, tier1_rate: 0.064, tier2_rate: 0.04 }
    insurance: { max_insurable_earnings: 65700, rate: 0.0131, max_annual_premium: 860.67 }
regions:
  "ON":
    name: "Ontario"
    scheme: standard
    health_premium: 900
    basic_personal_amount: 12747
    brackets:
      - { upper: 52886, rate: 0.0505 }
      - { upper: 105775, rate: 0.0915 }
      - { upper: 150000, rate: 0.1116 }
      - { upper: 220000, rate: 0.1216 }
      - { upper: null, rate: 0.1316 }
  "QC":
    name: "Quebec"
    scheme: quebec
    health_premium: 731
    basic_personal_amount: 18571
    brackets:
      - { upper: 53255, rate: 0.14 }
      - { upper: 106495, rate: 0.19 }
      - { upper: 129590, rate: 0.24 }
      - { upper: null, rate: 0.2575 }
"#;

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub(crate) fn terms() -> ContractTerms {
    serde_yaml::from_str(TERMS_YAML).unwrap()
}

pub(crate) fn deductions() -> DeductionsConfig {
    serde_yaml::from_str(DEDUCTIONS_YAML).unwrap()
}

fn ramp(start: &str, increment: &str) -> StepLadder {
    let (start, increment) = (dec(start), dec(increment));
    let mut rates = [Decimal::ZERO; 12];
    for (i, rate) in rates.iter_mut().enumerate() {
        *rate = start + increment * Decimal::from(i as u32);
    }
    StepLadder::new(rates)
}

fn first_officer(flat: &str, step3: &str, increment: &str) -> StepLadder {
    let tail = ramp(step3, increment);
    let mut rates = [dec(flat); 12];
    rates[2..].copy_from_slice(&tail.rates()[..10]);
    StepLadder::new(rates)
}

fn published(year: i32, multiplier: &str) -> PayTable {
    let m = dec(multiplier);

    let mut captain = SeatRows::new();
    captain.insert(Aircraft::B777, ramp("345.00", "5.00").scaled(m));
    captain.insert(Aircraft::A320, ramp("250.00", "4.00").scaled(m));
    captain.insert(Aircraft::A220, ramp("230.00", "4.00").scaled(m));

    let mut first_officer_rows = SeatRows::new();
    first_officer_rows.insert(Aircraft::B777, first_officer("90.00", "150.00", "10.00").scaled(m));
    first_officer_rows.insert(Aircraft::A320, first_officer("90.00", "130.00", "9.00").scaled(m));
    first_officer_rows.insert(Aircraft::A220, first_officer("90.00", "120.00", "8.00").scaled(m));

    let mut relief_pilot = SeatRows::new();
    relief_pilot.insert(Aircraft::B777, ramp("140.00", "8.00").scaled(m));

    PayTable {
        year,
        effective_date: None,
        source: TableSource::Published,
        captain,
        first_officer: first_officer_rows,
        relief_pilot,
    }
}

pub(crate) fn config() -> ContractConfig {
    ContractConfig::new(
        terms(),
        deductions(),
        vec![
            published(2024, "1.00"),
            published(2025, "1.05"),
            published(2026, "1.10"),
        ],
    )
    .unwrap()
}
