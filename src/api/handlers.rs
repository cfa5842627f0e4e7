//! HTTP request handlers for the Benefits Entitlement Engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::assess;
use crate::models::{AssessmentReport, HouseholdProfile};

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/assess", post(assess_handler))
        .route("/assess/explain", post(explain_handler))
        .route("/policy", get(policy_handler))
        .with_state(state)
}

/// Handler for `POST /assess`.
///
/// Returns the `BenefitAssessment` for the submitted household profile.
async fn assess_handler(
    State(state): State<AppState>,
    payload: Result<Json<HouseholdProfile>, JsonRejection>,
) -> Response {
    match run_assessment(&state, payload) {
        Ok(report) => json_ok(report.assessment),
        Err(err) => err.into_response(),
    }
}

/// Handler for `POST /assess/explain`.
///
/// Same as `/assess` but returns the full report with the audit trace.
async fn explain_handler(
    State(state): State<AppState>,
    payload: Result<Json<HouseholdProfile>, JsonRejection>,
) -> Response {
    match run_assessment(&state, payload) {
        Ok(report) => json_ok(report),
        Err(err) => err.into_response(),
    }
}

/// Handler for `GET /policy`.
async fn policy_handler(State(state): State<AppState>) -> Response {
    json_ok(state.policy())
}

fn run_assessment(
    state: &AppState,
    payload: Result<Json<HouseholdProfile>, JsonRejection>,
) -> Result<AssessmentReport, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing assessment request");

    let profile = match payload {
        Ok(Json(profile)) => profile,
        Err(rejection) => {
            return Err(ApiErrorResponse::bad_request(rejection_to_error(
                correlation_id,
                rejection,
            )));
        }
    };

    if let Err(err) = profile.validate() {
        warn!(correlation_id = %correlation_id, error = %err, "Profile rejected");
        return Err(err.into());
    }

    let start_time = Instant::now();
    let report = assess(&profile, state.policy());
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        policy_version = %report.policy_version,
        monthly_shortfall = %report.assessment.monthly_shortfall,
        unclaimed_value = %report.assessment.unclaimed_value,
        recommendations = report.assessment.recommendations.len(),
        duration_us = duration.as_micros(),
        "Assessment completed successfully"
    );

    Ok(report)
}

fn rejection_to_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message, e.g. "missing field `adults`" or an unknown tenure
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
