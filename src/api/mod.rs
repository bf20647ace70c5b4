//! HTTP API module for the pilot compensation engine.
//!
//! This module provides the REST API endpoints for annual compensation,
//! overtime valuation and pay-table inspection.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AnnualRequest, OvertimeRequest};
pub use response::{
    AnnualResponse, ApiError, ApiErrorResponse, CalculationMeta, ENGINE_VERSION,
    OvertimeResponse,
};
pub use state::AppState;
