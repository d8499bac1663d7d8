// Mapping of orchestrator failures onto HTTP responses

use arbiter_judge::RunError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Run(#[from] RunError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Run(RunError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Run(RunError::ProblemNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Run(RunError::NoTestCases(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Run(RunError::Judge(e)) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Run(RunError::Judge(_)) | ApiError::Run(RunError::Store(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Judge and store diagnostics stay in the logs
        let message = match &self {
            ApiError::Run(RunError::Judge(e)) if e.is_timeout() => {
                error!(error = %e, "Judge did not finish in time");
                "Timed out waiting for the judge".to_string()
            }
            ApiError::Run(RunError::Judge(e)) => {
                error!(error = %e, "Judge request failed");
                "An internal error occurred".to_string()
            }
            ApiError::Run(RunError::Store(e)) => {
                error!(error = %format!("{e:#}"), "Problem store failed");
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
