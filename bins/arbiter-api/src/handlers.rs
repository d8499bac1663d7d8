// HTTP route handlers for the Arbiter API

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use arbiter_judge::{NewProblem, RunRequest, ValidationRequest};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// Header carrying the caller's account; authentication happens upstream
pub const ACCOUNT_HEADER: &str = "X-Account-Id";

fn account_id(headers: &HeaderMap) -> Result<Option<Uuid>, ApiError> {
    let Some(value) = headers.get(ACCOUNT_HEADER) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .map(Some)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid {} header", ACCOUNT_HEADER)))
}

/// GET /status - Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /languages - Enabled languages and their judge ids
pub async fn list_languages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let languages = state.executor.registry().list_languages();
    (StatusCode::OK, Json(json!({ "data": languages })))
}

/// POST /run - Run code against every test case of a problem
pub async fn run_code(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(mut payload): Json<RunRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.account_id = account_id(&headers)?;

    let result = state.executor.run_code(&payload).await?;
    info!(problem_id = %result.problem_id, status = %result.status, "Run completed");

    Ok((StatusCode::OK, Json(json!({ "data": result }))))
}

/// POST /submit - Grade code; reports only the first failing test case
pub async fn submit_code(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(mut payload): Json<RunRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.account_id = account_id(&headers)?;

    let result = state.executor.submit_code(&payload).await?;
    info!(
        problem_id = %result.problem_id,
        status = %result.status,
        passed = result.passed_test_cases,
        "Submission graded"
    );

    Ok((StatusCode::CREATED, Json(json!({ "data": result }))))
}

/// POST /problems/validate - Check reference solutions against one test case
pub async fn validate_solutions(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ValidationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state
        .executor
        .validate_reference_solutions(&payload.function_name, &payload.test_case, &payload.solutions)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "data": report }))))
}

/// POST /problems - Store a new problem once its reference solutions pass every test case
pub async fn create_problem(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewProblem>,
) -> Result<impl IntoResponse, ApiError> {
    let creation = state.executor.create_problem(payload).await?;

    let status = if creation.problem.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(json!({ "data": creation }))))
}
