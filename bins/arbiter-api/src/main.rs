mod error;
mod handlers;
mod routes;

use anyhow::{Context, Result};
use arbiter_common::config::JudgeConfig;
use arbiter_judge::{Executor, InMemoryStore, LanguageRegistry, SubmissionClient};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub struct AppState {
    pub executor: Executor,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new().merge(routes::routes()).with_state(state)
}

fn load_store(path: &str) -> Result<InMemoryStore> {
    let path = Path::new(path);
    if !path.exists() {
        warn!(path = %path.display(), "No problem seed file, starting with an empty store");
        return Ok(InMemoryStore::new());
    }
    InMemoryStore::from_json_file(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Arbiter API booting...");

    let registry = LanguageRegistry::load_default().context("Failed to load language registry")?;
    info!(languages = registry.list_languages().len(), "Language registry loaded");

    let judge_config = JudgeConfig::from_env();
    let client = SubmissionClient::from_config(&judge_config).context("Failed to build judge client")?;
    info!(
        judge_url = %judge_config.base_url,
        max_concurrency = judge_config.max_concurrency,
        batch_endpoint = judge_config.use_batch_endpoint,
        "Judge client configured"
    );

    let problems_path =
        std::env::var("PROBLEMS_PATH").unwrap_or_else(|_| "config/problems.json".to_string());
    let store = load_store(&problems_path)?;
    info!(problems = store.problem_count().await, "Problem store ready");

    let executor = Executor::new(client, Arc::new(registry), Arc::new(store));
    let state = Arc::new(AppState { executor });

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app(state)).await.context("Server error")?;
    Ok(())
}
