//! Seat, aircraft and step types.
//!
//! These are the coordinates of a pay-table lookup: every hourly rate is keyed
//! by a seat category, an aircraft type and a step on the pay-progression
//! ladder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Crew role category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    /// Pilot in command.
    #[serde(alias = "CA")]
    Captain,
    /// Second in command.
    #[serde(alias = "FO")]
    FirstOfficer,
    /// Augmenting pilot on long-haul flights.
    #[serde(alias = "RP")]
    ReliefPilot,
}

impl Seat {
    /// All seats, in table order.
    pub const ALL: [Seat; 3] = [Seat::Captain, Seat::FirstOfficer, Seat::ReliefPilot];
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Captain => write!(f, "Captain"),
            Seat::FirstOfficer => write!(f, "First Officer"),
            Seat::ReliefPilot => write!(f, "Relief Pilot"),
        }
    }
}

impl FromStr for Seat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ca" | "captain" => Ok(Seat::Captain),
            "fo" | "first_officer" | "first-officer" => Ok(Seat::FirstOfficer),
            "rp" | "relief_pilot" | "relief-pilot" => Ok(Seat::ReliefPilot),
            other => Err(format!("unknown seat '{}'", other)),
        }
    }
}

/// Body class of an aircraft, which selects the First Officer anchoring curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fleet {
    /// Single-aisle aircraft.
    NarrowBody,
    /// Twin-aisle aircraft.
    WideBody,
}

/// Aircraft type covered by the pay tables.
///
/// Declaration order is table order: the first variant supplies the canonical
/// flat First Officer rate for steps 1 and 2 in projected years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aircraft {
    /// Boeing 777.
    B777,
    /// Boeing 787.
    B787,
    /// Airbus A330.
    A330,
    /// Airbus A321.
    A321,
    /// Airbus A320.
    A320,
    /// Boeing 737.
    B737,
    /// Airbus A220.
    A220,
}

impl Aircraft {
    /// All aircraft, in table order.
    pub const ALL: [Aircraft; 7] = [
        Aircraft::B777,
        Aircraft::B787,
        Aircraft::A330,
        Aircraft::A321,
        Aircraft::A320,
        Aircraft::B737,
        Aircraft::A220,
    ];

    /// Returns the body class of this aircraft.
    pub fn fleet(self) -> Fleet {
        match self {
            Aircraft::B777 | Aircraft::B787 | Aircraft::A330 => Fleet::WideBody,
            Aircraft::A321 | Aircraft::A320 | Aircraft::B737 | Aircraft::A220 => {
                Fleet::NarrowBody
            }
        }
    }

    /// Relief pilots are only carried on the long-haul wide-body types.
    pub fn is_relief_pilot_eligible(self) -> bool {
        matches!(self, Aircraft::B777 | Aircraft::B787 | Aircraft::A330)
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Aircraft::B777 => "B777",
            Aircraft::B787 => "B787",
            Aircraft::A330 => "A330",
            Aircraft::A321 => "A321",
            Aircraft::A320 => "A320",
            Aircraft::B737 => "B737",
            Aircraft::A220 => "A220",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Aircraft {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aircraft::ALL
            .into_iter()
            .find(|a| a.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown aircraft '{}'", s))
    }
}

/// A position on the 12-step pay-progression ladder.
///
/// Construction always clamps into `1..=12`, so a `Step` can index a ladder
/// without further checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Step(u8);

impl Step {
    /// Number of steps on every ladder.
    pub const COUNT: usize = 12;
    /// The first step.
    pub const MIN: Step = Step(1);
    /// The top step.
    pub const MAX: Step = Step(12);

    /// Creates a step, clamping the value into `1..=12`.
    ///
    /// ```
    /// use pilot_pay_engine::models::Step;
    ///
    /// assert_eq!(Step::clamped(0).get(), 1);
    /// assert_eq!(Step::clamped(7).get(), 7);
    /// assert_eq!(Step::clamped(40).get(), 12);
    /// ```
    pub fn clamped(value: i64) -> Step {
        Step(value.clamp(1, Self::COUNT as i64) as u8)
    }

    /// Returns the step number (1-based).
    pub fn get(self) -> u8 {
        self.0
    }

    /// Returns the zero-based ladder index.
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    /// The following step, saturating at the top of the ladder.
    pub fn next(self) -> Step {
        Step::clamped(i64::from(self.0) + 1)
    }

    /// Iterates over all twelve steps in ascending order.
    pub fn all() -> impl Iterator<Item = Step> {
        (1..=Self::COUNT as u8).map(Step)
    }
}

impl From<u8> for Step {
    fn from(value: u8) -> Self {
        Step::clamped(i64::from(value))
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
