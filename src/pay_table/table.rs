//! A single year's pay table.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Aircraft, Seat};

use super::StepLadder;

/// Rows of one seat category, keyed by aircraft in table order.
pub type SeatRows = BTreeMap<Aircraft, StepLadder>;

/// Where a table's rates came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSource {
    /// Published verbatim in the collective agreement.
    #[default]
    Published,
    /// Derived from the last published year.
    Projected,
}

/// Hourly rates for every seat, aircraft and step in one contract year.
///
/// Published tables are deserialized straight from `pay_tables/<year>.yaml`.
/// Relief pilot rows exist only for the RP-eligible wide-body aircraft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayTable {
    /// The contract year these rates belong to.
    pub year: i32,
    /// Date the published rates took effect, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    /// Origin of the rates.
    #[serde(default)]
    pub source: TableSource,
    /// Captain rows.
    pub captain: SeatRows,
    /// First Officer rows.
    pub first_officer: SeatRows,
    /// Relief Pilot rows.
    #[serde(default)]
    pub relief_pilot: SeatRows,
}

impl PayTable {
    /// Returns the rows for a seat.
    pub fn rows(&self, seat: Seat) -> &SeatRows {
        match seat {
            Seat::Captain => &self.captain,
            Seat::FirstOfficer => &self.first_officer,
            Seat::ReliefPilot => &self.relief_pilot,
        }
    }

    /// Returns the ladder for a seat and aircraft, if the row exists.
    pub fn ladder(&self, seat: Seat, aircraft: Aircraft) -> Option<&StepLadder> {
        self.rows(seat).get(&aircraft)
    }
}
