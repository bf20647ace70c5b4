//! Core data models for the pilot compensation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod crew;
mod inputs;
mod money;
mod results;

pub use audit::{AuditLog, AuditStep};
pub use crew::{Aircraft, Fleet, Seat, Step};
pub use inputs::{CompensationInput, OvertimeInput};
pub use money::round_cents;
pub use results::{
    AnnualResult, MonthlyBreakdown, MonthlyDues, OvertimeResult, PensionContribution,
    ProfitShare, SegmentLine, TaxBreakdown,
};
