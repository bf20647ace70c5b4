//! Error types for the pilot compensation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading the contract
//! configuration or resolving pay rates.

use thiserror::Error;

use crate::models::{Aircraft, Seat};

/// The main error type for the pilot compensation engine.
///
/// Lookup failures are fatal to a single calculation and are surfaced
/// verbatim to the caller. Numeric computations themselves never fail.
///
/// # Example
///
/// ```
/// use pilot_pay_engine::error::EngineError;
///
/// let error = EngineError::PayTableNotFound { year: 2040 };
/// assert_eq!(error.to_string(), "No pay table for year 2040");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but violates a structural rule.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the violated rule.
        message: String,
    },

    /// No pay table (published or projected) exists for the year.
    #[error("No pay table for year {year}")]
    PayTableNotFound {
        /// The requested table year.
        year: i32,
    },

    /// Relief pilots are only scheduled on a subset of wide-body aircraft.
    #[error("Relief pilot rates do not exist for aircraft {aircraft}")]
    ReliefPilotNotAvailable {
        /// The ineligible aircraft.
        aircraft: Aircraft,
    },

    /// The table for the year has no row for the seat and aircraft.
    #[error("No {seat} rate row for aircraft {aircraft} in year {year}")]
    RateNotFound {
        /// The requested seat.
        seat: Seat,
        /// The requested aircraft.
        aircraft: Aircraft,
        /// The requested table year.
        year: i32,
    },

    /// The region code is not present in the deductions configuration.
    #[error("Region not found: {code}")]
    RegionNotFound {
        /// The region code that was not found.
        code: String,
    },

    /// Caller-supplied input failed plausibility validation.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors caused by a missing table, row, or region.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            EngineError::PayTableNotFound { .. }
                | EngineError::ReliefPilotNotAvailable { .. }
                | EngineError::RateNotFound { .. }
                | EngineError::RegionNotFound { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
