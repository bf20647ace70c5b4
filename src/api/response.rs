//! Response types for the pilot compensation API.
//!
//! This module defines the success envelopes, the error response structures
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AnnualResult, OvertimeResult};

/// Engine version reported in every calculation response.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Metadata identifying one calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationMeta {
    /// Unique identifier of the calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Time spent calculating, in microseconds.
    pub duration_us: u64,
}

impl CalculationMeta {
    /// Creates metadata for a calculation that took `duration_us`.
    pub fn new(calculation_id: Uuid, duration_us: u64) -> Self {
        Self {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            duration_us,
        }
    }
}

/// Response body of the `/annual` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualResponse {
    /// Calculation metadata.
    #[serde(flatten)]
    pub meta: CalculationMeta,
    /// The annual result.
    #[serde(flatten)]
    pub result: AnnualResult,
}

/// Response body of the `/overtime` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeResponse {
    /// Calculation metadata.
    #[serde(flatten)]
    pub meta: CalculationMeta,
    /// The overtime valuation.
    #[serde(flatten)]
    pub result: OvertimeResult,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response for a request the handler rejected itself.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        // Lookup and input failures are the caller's; anything else is ours
        let status = if error.is_lookup() || matches!(error, EngineError::InvalidInput { .. }) {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let message = error.to_string();
        let error = match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => {
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message)
            }
            EngineError::PayTableNotFound { year } => ApiError::with_details(
                "PAY_TABLE_NOT_FOUND",
                message,
                format!("Tables are available for a contiguous range of years; {} is outside it", year),
            ),
            EngineError::ReliefPilotNotAvailable { .. } => ApiError::with_details(
                "RELIEF_PILOT_NOT_AVAILABLE",
                message,
                "Relief pilots are only scheduled on long-haul wide-body aircraft",
            ),
            EngineError::RateNotFound { .. } => ApiError::new("RATE_NOT_FOUND", message),
            EngineError::RegionNotFound { code } => ApiError::with_details(
                "REGION_NOT_FOUND",
                message,
                format!("The region code '{}' is not configured", code),
            ),
            EngineError::InvalidInput { field, message } => ApiError::with_details(
                "VALIDATION_ERROR",
                format!("Invalid field '{}'", field),
                message,
            ),
        };

        ApiErrorResponse { status, error }
    }
}
