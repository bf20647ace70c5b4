//! Twelve-step hourly rate ladders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Step, round_cents};

/// Hourly rates for steps 1 through 12 of one seat and aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepLadder([Decimal; Step::COUNT]);

impl StepLadder {
    /// Creates a ladder from twelve rates, step 1 first.
    pub fn new(rates: [Decimal; Step::COUNT]) -> Self {
        Self(rates)
    }

    /// Returns the rate at a step.
    pub fn rate(&self, step: Step) -> Decimal {
        self.0[step.index()]
    }

    /// Returns all twelve rates, step 1 first.
    pub fn rates(&self) -> &[Decimal; Step::COUNT] {
        &self.0
    }

    /// Multiplies every cell by `factor` and rounds to cents.
    pub fn scaled(&self, factor: Decimal) -> Self {
        Self(self.0.map(|rate| round_cents(rate * factor)))
    }

    /// Returns a copy with one step replaced.
    pub fn with_rate(mut self, step: Step, rate: Decimal) -> Self {
        self.0[step.index()] = rate;
        self
    }

    /// Returns a copy where `step` holds the greater of its current rate and
    /// `candidate`. A raise-only update never lowers a cell.
    pub fn raised(self, step: Step, candidate: Decimal) -> Self {
        let current = self.rate(step);
        self.with_rate(step, current.max(candidate))
    }

    /// Forces each step from `from` upward to be at least the previous step.
    pub fn non_decreasing_from(mut self, from: Step) -> Self {
        for index in (from.index() + 1)..Step::COUNT {
            if self.0[index] < self.0[index - 1] {
                self.0[index] = self.0[index - 1];
            }
        }
        self
    }

    /// True when no step pays less than the step below it, from `from` up.
    pub fn is_non_decreasing_from(&self, from: Step) -> bool {
        self.0[from.index()..].windows(2).all(|pair| pair[0] <= pair[1])
    }
}
