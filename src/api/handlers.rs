//! HTTP request handlers for the pilot compensation API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_annual, calculate_overtime};
use crate::error::EngineError;

use super::request::{AnnualRequest, OvertimeRequest};
use super::response::{
    AnnualResponse, ApiError, ApiErrorResponse, CalculationMeta, OvertimeResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/annual", post(annual_handler))
        .route("/overtime", post(overtime_handler))
        .route("/pay-tables/:year", get(pay_table_handler))
        .with_state(state)
}

/// Handler for POST /annual.
///
/// Accepts an annual request and returns the annual result with its
/// calculation metadata.
async fn annual_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnnualRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing annual request");

    let input = match parse(payload, correlation_id).and_then(|request| {
        request
            .validate()
            .map_err(|err| rejected(err, correlation_id))
    }) {
        Ok(input) => input,
        Err(response) => return response.into_response(),
    };

    let start_time = Instant::now();
    match calculate_annual(&input, state.config().config()) {
        Ok(result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                seat = %result.seat,
                aircraft = %result.aircraft,
                year = result.year,
                gross = %result.gross,
                net = %result.net,
                duration_us = duration_us,
                "Annual calculation completed successfully"
            );
            json_ok(AnnualResponse {
                meta: CalculationMeta::new(correlation_id, duration_us),
                result,
            })
        }
        Err(err) => rejected(err, correlation_id).into_response(),
    }
}

/// Handler for POST /overtime.
async fn overtime_handler(
    State(state): State<AppState>,
    payload: Result<Json<OvertimeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing overtime request");

    let input = match parse(payload, correlation_id).and_then(|request| {
        request
            .validate()
            .map_err(|err| rejected(err, correlation_id))
    }) {
        Ok(input) => input,
        Err(response) => return response.into_response(),
    };

    let start_time = Instant::now();
    match calculate_overtime(&input, state.config().config()) {
        Ok(result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                duty_hours = %result.duty_hours,
                gross = %result.gross,
                estimated_net = %result.estimated_net,
                duration_us = duration_us,
                "Overtime valuation completed successfully"
            );
            json_ok(OvertimeResponse {
                meta: CalculationMeta::new(correlation_id, duration_us),
                result,
            })
        }
        Err(err) => rejected(err, correlation_id).into_response(),
    }
}

/// Handler for GET /pay-tables/:year.
///
/// Returns the resolved table for the year, published or projected.
async fn pay_table_handler(State(state): State<AppState>, Path(year): Path<i32>) -> Response {
    match state.config().registry().table(year) {
        Ok(table) => {
            info!(year = year, source = ?table.source, "Served pay table");
            json_ok(table)
        }
        Err(err) => {
            warn!(year = year, "Pay table not found");
            let mut response = ApiErrorResponse::from(err);
            response.status = StatusCode::NOT_FOUND;
            response.into_response()
        }
    }
}

/// Unwraps a JSON body, mapping rejections to API errors.
fn parse<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn rejected(err: EngineError, correlation_id: Uuid) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation rejected"
    );
    err.into()
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::response::ENGINE_VERSION;
    use crate::config::ConfigLoader;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/contract").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_annual_valid_request_returns_200() {
        let body = r#"{
            "seat": "captain",
            "aircraft": "b777",
            "year": 2026,
            "step": 8,
            "avg_monthly_hours": "75",
            "region": "ON"
        }"#;
        let (status, json) = post_json("/annual", body).await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["calculation_id"].is_string());
        assert_eq!(json["engine_version"], ENGINE_VERSION);
        assert_eq!(json["segments"].as_array().unwrap().len(), 3);
        assert_eq!(json["segments"][0]["table_year"], 2025);
    }

    #[tokio::test]
    async fn test_annual_malformed_json_returns_400() {
        let (status, json) = post_json("/annual", "{invalid json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_annual_missing_region_returns_validation_error() {
        let body = r#"{
            "seat": "captain",
            "aircraft": "b777",
            "year": 2026,
            "step": 8,
            "avg_monthly_hours": "75"
        }"#;
        let (status, json) = post_json("/annual", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_annual_implausible_hours_returns_400() {
        let body = r#"{
            "seat": "captain",
            "aircraft": "b777",
            "year": 2026,
            "step": 12,
            "avg_monthly_hours": "100000000000000000000000000",
            "region": "ON"
        }"#;
        let (status, json) = post_json("/annual", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "Invalid field 'avg_monthly_hours'");
    }

    #[tokio::test]
    async fn test_relief_pilot_on_narrow_body_returns_400() {
        let body = r#"{
            "seat": "RP",
            "aircraft": "a320",
            "year": 2026,
            "step": 8,
            "avg_monthly_hours": "75",
            "region": "ON"
        }"#;
        let (status, json) = post_json("/annual", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "RELIEF_PILOT_NOT_AVAILABLE");
    }

    #[tokio::test]
    async fn test_overtime_returns_duty_hours() {
        let body = r#"{
            "seat": "captain",
            "aircraft": "a220",
            "year": 2026,
            "step": 6,
            "region": "QC",
            "credit_hours": 2,
            "credit_minutes": 30
        }"#;
        let (status, json) = post_json("/overtime", body).await;
        assert_eq!(status, StatusCode::OK);
        let duty_hours = Decimal::from_str(json["duty_hours"].as_str().unwrap()).unwrap();
        assert_eq!(duty_hours, Decimal::from(5));
    }

    #[tokio::test]
    async fn test_overtime_invalid_minutes_returns_400() {
        let body = r#"{
            "seat": "captain",
            "aircraft": "a220",
            "year": 2026,
            "step": 6,
            "region": "QC",
            "credit_hours": 2,
            "credit_minutes": 75
        }"#;
        let (status, json) = post_json("/overtime", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_pay_table_lookup() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/pay-tables/2030")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["year"], 2030);
        assert_eq!(json["source"], "projected");
    }

    #[tokio::test]
    async fn test_pay_table_unknown_year_returns_404() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/pay-tables/1990")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
