//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to cents, half away from zero.
///
/// Intermediate sums stay unrounded; only reported figures and published
/// table cells go through this function.
///
/// ```
/// use pilot_pay_engine::models::round_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_cents(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// assert_eq!(round_cents(Decimal::from_str("10.004").unwrap()), Decimal::from_str("10.00").unwrap());
/// ```
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
