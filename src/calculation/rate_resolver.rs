//! Hourly rate resolution.
//!
//! Combines a pay-table lookup with the special per-hour premium.

use rust_decimal::Decimal;

use crate::config::{ContractConfig, SpecialRateConfig};
use crate::error::EngineResult;
use crate::models::{Aircraft, Seat, Step};
use crate::pay_table::PayTableRegistry;

/// Highest First Officer step that is exempt from the special premium.
const PREMIUM_EXEMPT_FIRST_OFFICER_STEPS: u8 = 2;

/// Resolves hourly rates against the registry.
///
/// # Example
///
/// ```no_run
/// use pilot_pay_engine::calculation::RateResolver;
/// use pilot_pay_engine::config::ConfigLoader;
/// use pilot_pay_engine::models::{Aircraft, Seat, Step};
///
/// let loader = ConfigLoader::load("./config/contract")?;
/// let resolver = RateResolver::new(loader.config());
/// let rate = resolver.rate(Seat::Captain, Aircraft::A220, 2026, Step::MAX, true)?;
/// println!("A220 captain with premium: ${}", rate);
/// # Ok::<(), pilot_pay_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RateResolver<'a> {
    registry: &'a PayTableRegistry,
    special_rate: &'a SpecialRateConfig,
}

impl<'a> RateResolver<'a> {
    /// Creates a resolver over a loaded configuration.
    pub fn new(config: &'a ContractConfig) -> Self {
        Self {
            registry: config.registry(),
            special_rate: &config.terms().special_rate,
        }
    }

    /// Returns the hourly rate for a seat, aircraft, table year and step.
    ///
    /// With `special_rate` set, the configured premium is added on the
    /// configured aircraft, except for First Officers on steps 1 and 2.
    ///
    /// # Errors
    ///
    /// Any lookup error from the registry: missing table year, Relief Pilot
    /// on an ineligible aircraft, or a missing row.
    pub fn rate(
        &self,
        seat: Seat,
        aircraft: Aircraft,
        year: i32,
        step: Step,
        special_rate: bool,
    ) -> EngineResult<Decimal> {
        let base = self.registry.lookup(year, seat, aircraft, step)?;
        if special_rate && self.premium_applies(seat, aircraft, step) {
            Ok(base + self.special_rate.premium_per_hour)
        } else {
            Ok(base)
        }
    }

    fn premium_applies(&self, seat: Seat, aircraft: Aircraft, step: Step) -> bool {
        let exempt =
            seat == Seat::FirstOfficer && step.get() <= PREMIUM_EXEMPT_FIRST_OFFICER_STEPS;
        aircraft == self.special_rate.aircraft && !exempt
    }
}
