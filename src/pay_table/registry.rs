//! The pay-table registry.
//!
//! Built once at startup from the published tables and the projection rules,
//! then shared read-only by every calculation.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{AnchoringConfig, ProjectionConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{Aircraft, Seat, Step};

use super::projection::{anchor, compress_low_relief_steps, project};
use super::PayTable;

/// All pay tables, published and projected, keyed by year.
///
/// # Example
///
/// ```no_run
/// use pilot_pay_engine::config::ConfigLoader;
/// use pilot_pay_engine::models::{Aircraft, Seat, Step};
///
/// let loader = ConfigLoader::load("./config/contract")?;
/// let rate = loader.registry().lookup(2030, Seat::Captain, Aircraft::B787, Step::MAX)?;
/// println!("2030 B787 captain top step: ${}", rate);
/// # Ok::<(), pilot_pay_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayTableRegistry {
    tables: BTreeMap<i32, PayTable>,
    last_published_year: i32,
}

impl PayTableRegistry {
    /// Validates the published tables and extends them through the forecast
    /// horizon.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if there are no published tables, the years
    /// are not consecutive, a table lacks Captain or First Officer rows, or a
    /// Relief Pilot row names an ineligible aircraft.
    pub fn build(
        published: Vec<PayTable>,
        projection: &ProjectionConfig,
        anchoring: &AnchoringConfig,
    ) -> EngineResult<Self> {
        let mut tables = BTreeMap::new();
        for table in published {
            validate_published(&table)?;
            let year = table.year;
            if tables.insert(year, table).is_some() {
                return Err(EngineError::InvalidConfig {
                    message: format!("duplicate pay table for year {}", year),
                });
            }
        }

        let (first_year, last) = match (tables.keys().next(), tables.values().next_back()) {
            (Some(first), Some(last)) => (*first, last.clone()),
            _ => {
                return Err(EngineError::InvalidConfig {
                    message: "no published pay tables".to_string(),
                });
            }
        };

        let expected_len = (last.year - first_year + 1) as usize;
        if tables.len() != expected_len {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "published pay tables must cover consecutive years {}..={}",
                    first_year, last.year
                ),
            });
        }

        for year in (last.year + 1)..=projection.horizon_year {
            let projected = project(&last, year, projection.raise_factor);
            let anchored = anchor(&projected, anchoring);
            let compressed =
                compress_low_relief_steps(&anchored, anchoring.relief_pilot_low_step_discount);
            debug!(
                year,
                base_year = last.year,
                raise_factor = %projection.raise_factor,
                "Projected pay table"
            );
            tables.insert(year, compressed);
        }

        Ok(Self {
            tables,
            last_published_year: last.year,
        })
    }

    /// Returns the table for a year.
    pub fn table(&self, year: i32) -> EngineResult<&PayTable> {
        self.tables
            .get(&year)
            .ok_or(EngineError::PayTableNotFound { year })
    }

    /// Looks up a raw table rate with no premium applied.
    ///
    /// # Errors
    ///
    /// `PayTableNotFound` if the year is outside the registry,
    /// `ReliefPilotNotAvailable` for Relief Pilot on an ineligible aircraft,
    /// and `RateNotFound` if the table has no row for the seat and aircraft.
    pub fn lookup(
        &self,
        year: i32,
        seat: Seat,
        aircraft: Aircraft,
        step: Step,
    ) -> EngineResult<rust_decimal::Decimal> {
        let table = self.table(year)?;
        if seat == Seat::ReliefPilot && !aircraft.is_relief_pilot_eligible() {
            return Err(EngineError::ReliefPilotNotAvailable { aircraft });
        }
        table
            .ladder(seat, aircraft)
            .map(|ladder| ladder.rate(step))
            .ok_or(EngineError::RateNotFound {
                seat,
                aircraft,
                year,
            })
    }

    /// All years with a table, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.tables.keys().copied()
    }

    /// The last year published in the agreement.
    pub fn last_published_year(&self) -> i32 {
        self.last_published_year
    }
}

fn validate_published(table: &PayTable) -> EngineResult<()> {
    if table.captain.is_empty() || table.first_officer.is_empty() {
        return Err(EngineError::InvalidConfig {
            message: format!(
                "pay table {} must have captain and first officer rows",
                table.year
            ),
        });
    }
    if let Some(aircraft) = table
        .relief_pilot
        .keys()
        .find(|aircraft| !aircraft.is_relief_pilot_eligible())
    {
        return Err(EngineError::InvalidConfig {
            message: format!(
                "pay table {} has a relief pilot row for ineligible aircraft {}",
                table.year, aircraft
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pay_table::{SeatRows, StepLadder, TableSource};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ramp(start: &str, increment: &str) -> StepLadder {
        let start = dec(start);
        let increment = dec(increment);
        let mut rates = [Decimal::ZERO; 12];
        for (i, rate) in rates.iter_mut().enumerate() {
            *rate = start + increment * Decimal::from(i as u32);
        }
        StepLadder::new(rates)
    }

    fn published(year: i32, scale: &str) -> PayTable {
        let scale = dec(scale);
        let mut captain = SeatRows::new();
        captain.insert(Aircraft::B777, ramp("380.00", "5.00").scaled(scale));
        captain.insert(Aircraft::A321, ramp("290.00", "4.00").scaled(scale));

        let mut first_officer = SeatRows::new();
        first_officer.insert(Aircraft::B777, ramp("95.00", "14.00").scaled(scale));
        first_officer.insert(Aircraft::A321, ramp("95.00", "11.00").scaled(scale));

        let mut relief_pilot = SeatRows::new();
        relief_pilot.insert(Aircraft::B777, ramp("130.00", "12.00").scaled(scale));

        PayTable {
            year,
            effective_date: None,
            source: TableSource::Published,
            captain,
            first_officer,
            relief_pilot,
        }
    }

    fn projection() -> ProjectionConfig {
        ProjectionConfig {
            raise_factor: dec("1.03"),
            horizon_year: 2030,
        }
    }

    fn anchoring() -> AnchoringConfig {
        AnchoringConfig {
            first_officer_narrow_body: [
                "0.43", "0.47", "0.51", "0.55", "0.58", "0.61", "0.63", "0.65", "0.67", "0.68",
            ]
            .map(dec),
            first_officer_wide_body: [
                "0.41", "0.45", "0.49", "0.52", "0.55", "0.58", "0.61", "0.64", "0.66", "0.67",
            ]
            .map(dec),
            relief_pilot: [
                "0.38", "0.42", "0.46", "0.49", "0.52", "0.55", "0.57", "0.59", "0.60", "0.61",
            ]
            .map(dec),
            relief_pilot_low_step_discount: dec("0.05"),
        }
    }

    fn registry() -> PayTableRegistry {
        PayTableRegistry::build(
            vec![published(2025, "1.00"), published(2026, "1.04")],
            &projection(),
            &anchoring(),
        )
        .unwrap()
    }

    #[test]
    fn test_build_extends_through_horizon() {
        let registry = registry();
        let years: Vec<i32> = registry.years().collect();
        assert_eq!(years, vec![2025, 2026, 2027, 2028, 2029, 2030]);
        assert_eq!(registry.last_published_year(), 2026);
        assert_eq!(
            registry.table(2029).unwrap().source,
            TableSource::Projected
        );
    }

    #[test]
    fn test_published_tables_are_kept_verbatim() {
        let registry = registry();
        assert_eq!(registry.table(2026).unwrap(), &published(2026, "1.04"));
    }

    #[test]
    fn test_projected_captain_is_compounded_from_last_published() {
        let registry = registry();
        let base = registry
            .lookup(2026, Seat::Captain, Aircraft::B777, Step::MAX)
            .unwrap();
        let projected = registry
            .lookup(2028, Seat::Captain, Aircraft::B777, Step::MAX)
            .unwrap();
        assert_eq!(
            projected,
            crate::models::round_cents(base * dec("1.03") * dec("1.03"))
        );
    }

    #[test]
    fn test_missing_year_is_lookup_error() {
        let registry = registry();
        let err = registry
            .lookup(2024, Seat::Captain, Aircraft::B777, Step::MIN)
            .unwrap_err();
        assert!(matches!(err, EngineError::PayTableNotFound { year: 2024 }));
    }

    #[test]
    fn test_relief_pilot_on_narrow_body_is_rejected() {
        let registry = registry();
        let err = registry
            .lookup(2026, Seat::ReliefPilot, Aircraft::A321, Step::MIN)
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::ReliefPilotNotAvailable {
                aircraft: Aircraft::A321
            }
        ));
    }

    #[test]
    fn test_missing_row_is_rate_not_found() {
        let registry = registry();
        let err = registry
            .lookup(2026, Seat::Captain, Aircraft::A220, Step::MIN)
            .unwrap_err();
        assert!(matches!(err, EngineError::RateNotFound { .. }));
    }

    #[test]
    fn test_gap_in_published_years_is_rejected() {
        let result = PayTableRegistry::build(
            vec![published(2024, "1.00"), published(2026, "1.04")],
            &projection(),
            &anchoring(),
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_relief_pilot_row_for_ineligible_aircraft_is_rejected() {
        let mut table = published(2025, "1.00");
        table
            .relief_pilot
            .insert(Aircraft::A220, ramp("100.00", "1.00"));
        let result = PayTableRegistry::build(vec![table], &projection(), &anchoring());
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_empty_published_set_is_rejected() {
        let result = PayTableRegistry::build(vec![], &projection(), &anchoring());
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_projected_ladders_are_monotone_in_step(
            year in 2027i32..=2030,
            seat_index in 0usize..3,
            aircraft_index in 0usize..2,
        ) {
            let registry = registry();
            let seat = Seat::ALL[seat_index];
            let aircraft = [Aircraft::B777, Aircraft::A321][aircraft_index];
            prop_assume!(seat != Seat::ReliefPilot || aircraft.is_relief_pilot_eligible());

            let rates: Vec<Decimal> = Step::all()
                .map(|step| registry.lookup(year, seat, aircraft, step).unwrap())
                .collect();
            for pair in rates.windows(2) {
                prop_assert!(pair[0] <= pair[1], "{:?}", rates);
            }
        }
    }
}
