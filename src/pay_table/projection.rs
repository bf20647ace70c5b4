//! Forecast-year table construction.
//!
//! A forecast table is produced by three pure stages, each consuming the
//! previous snapshot and returning a new one:
//!
//! 1. [`project`] scales the last published table by the compounded raise
//!    factor and rounds every cell to cents.
//! 2. [`anchor`] lifts First Officer and Relief Pilot steps 3-12 to a fixed
//!    fraction of the same year's Captain step-12 rate, pins First Officer
//!    steps 1-2 to the first aircraft's flat rate, and restores a
//!    non-decreasing ladder from step 2 up.
//! 3. [`compress_low_relief_steps`] lifts Relief Pilot steps 1-4 to a fixed
//!    discount off step 5.
//!
//! Stages 2 and 3 are raise-only: a cell never ends up below the value it
//! entered the stage with.

use rust_decimal::Decimal;

use crate::config::AnchoringConfig;
use crate::models::{Aircraft, Seat, Step, round_cents};

use super::{PayTable, SeatRows, StepLadder, TableSource};

/// Number of leading steps that anchoring leaves untouched.
const UNANCHORED_STEPS: usize = 2;

/// Relief Pilot steps covered by the low-step compression.
const LOW_RELIEF_STEPS: usize = 4;

/// Stage 1: scales `base` to `year` by `raise_factor` compounded once per
/// year past the base table.
pub fn project(base: &PayTable, year: i32, raise_factor: Decimal) -> PayTable {
    let years_out = (year - base.year).max(0);
    let factor = (0..years_out).fold(Decimal::ONE, |acc, _| acc * raise_factor);

    let scale = |rows: &SeatRows| -> SeatRows {
        rows.iter()
            .map(|(aircraft, ladder)| (*aircraft, ladder.scaled(factor)))
            .collect()
    };

    PayTable {
        year,
        effective_date: None,
        source: TableSource::Projected,
        captain: scale(&base.captain),
        first_officer: scale(&base.first_officer),
        relief_pilot: scale(&base.relief_pilot),
    }
}

/// Stage 2: anchors First Officer and Relief Pilot ladders to the Captain
/// step-12 rate of the same table.
pub fn anchor(projected: &PayTable, curves: &AnchoringConfig) -> PayTable {
    let flat_first_officer = projected
        .first_officer
        .values()
        .next()
        .map(|ladder| (ladder.rate(Step::MIN), ladder.rate(Step::clamped(2))));

    let first_officer = projected
        .first_officer
        .iter()
        .map(|(aircraft, ladder)| {
            let curve = curves.first_officer_curve(aircraft.fleet());
            let mut anchored = anchor_ladder(projected, *aircraft, *ladder, curve);
            if let Some((step1, step2)) = flat_first_officer {
                anchored = anchored
                    .with_rate(Step::MIN, step1)
                    .with_rate(Step::clamped(2), step2);
            }
            (*aircraft, anchored.non_decreasing_from(Step::clamped(2)))
        })
        .collect();

    let relief_pilot = projected
        .relief_pilot
        .iter()
        .map(|(aircraft, ladder)| {
            let anchored = anchor_ladder(projected, *aircraft, *ladder, &curves.relief_pilot);
            (*aircraft, anchored.non_decreasing_from(Step::clamped(2)))
        })
        .collect();

    PayTable {
        first_officer,
        relief_pilot,
        ..projected.clone()
    }
}

/// Stage 3: lifts Relief Pilot steps 1-4 to `discount` off step 5.
pub fn compress_low_relief_steps(anchored: &PayTable, discount: Decimal) -> PayTable {
    let relief_pilot = anchored
        .relief_pilot
        .iter()
        .map(|(aircraft, ladder)| {
            let floor = round_cents(ladder.rate(Step::clamped(5)) * (Decimal::ONE - discount));
            let compressed = Step::all()
                .take(LOW_RELIEF_STEPS)
                .fold(*ladder, |acc, step| acc.raised(step, floor));
            (*aircraft, compressed)
        })
        .collect();

    PayTable {
        relief_pilot,
        ..anchored.clone()
    }
}

/// Raises steps 3-12 of `ladder` to `curve` fractions of the Captain step-12
/// rate. Rows without a Captain counterpart are returned unchanged.
fn anchor_ladder(
    table: &PayTable,
    aircraft: Aircraft,
    ladder: StepLadder,
    curve: &[Decimal],
) -> StepLadder {
    let Some(captain_top) = table
        .ladder(Seat::Captain, aircraft)
        .map(|captain| captain.rate(Step::MAX))
    else {
        return ladder;
    };

    Step::all()
        .skip(UNANCHORED_STEPS)
        .zip(curve)
        .fold(ladder, |acc, (step, fraction)| {
            acc.raised(step, round_cents(captain_top * fraction))
        })
}
