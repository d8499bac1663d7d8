use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(handlers::health_check))
        .route("/languages", get(handlers::list_languages))
        .route("/run", post(handlers::run_code))
        .route("/submit", post(handlers::submit_code))
        .route("/problems/validate", post(handlers::validate_solutions))
        .route("/problems", post(handlers::create_problem))
}
