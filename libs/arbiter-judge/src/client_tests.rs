// Wire-format tests for HttpJudge against a local axum server standing in for the judge

use crate::client::{HttpJudge, JudgeApi};
use crate::error::JudgeError;
use arbiter_common::config::JudgeConfig;
use arbiter_common::types::Submission;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorded {
    bodies: Vec<Value>,
    queries: Vec<HashMap<String, String>>,
    auth: Vec<Option<String>>,
}

type Shared = Arc<Mutex<Recorded>>;

fn record(state: &Shared, headers: &HeaderMap, query: HashMap<String, String>, body: Option<Value>) {
    let mut recorded = state.lock().unwrap();
    recorded.queries.push(query);
    recorded.auth.push(
        headers
            .get("X-Auth-Token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );
    if let Some(body) = body {
        recorded.bodies.push(body);
    }
}

async fn create(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    record(&state, &headers, query, Some(body));
    (StatusCode::CREATED, Json(json!({ "token": "abc-123" })))
}

async fn create_batch(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let count = body["submissions"].as_array().map(Vec::len).unwrap_or(0);
    record(&state, &headers, query, Some(body));
    let tokens: Vec<Value> = (0..count).map(|i| json!({ "token": format!("t{i}") })).collect();
    (StatusCode::CREATED, Json(Value::Array(tokens)))
}

async fn fetch(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(token): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    record(&state, &headers, query, None);
    match token.as_str() {
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))),
        "garbled" => (
            StatusCode::OK,
            Json(json!({
                "stdout": "not base64!",
                "status": { "id": 3, "description": "Accepted" }
            })),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({
                "stdout": "MQo=",
                "stderr": null,
                "compile_output": null,
                "message": null,
                "exit_code": 0,
                "status": { "id": 3, "description": "Accepted" },
                "time": "0.004",
                "memory": 3012,
                "language": { "id": 71, "name": "Python (3.8.1)" },
                "token": token
            })),
        ),
    }
}

async fn spawn_judge() -> (HttpJudge, Shared) {
    let state: Shared = Arc::new(Mutex::new(Recorded::default()));
    let app = Router::new()
        .route("/submissions", post(create))
        .route("/submissions/batch", post(create_batch))
        .route("/submissions/:token", get(fetch))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = JudgeConfig {
        base_url: format!("http://{addr}/"),
        auth_token: Some("secret".to_string()),
        ..JudgeConfig::default()
    };
    (HttpJudge::new(&config).unwrap(), state)
}

#[tokio::test]
async fn test_create_encodes_body_and_sends_auth() {
    let (judge, state) = spawn_judge().await;

    let mut submission = Submission::new("print(1)", 71);
    submission.stdin = "in".to_string();
    let token = judge.create(&submission).await.unwrap();
    assert_eq!(token, "abc-123");

    let recorded = state.lock().unwrap();
    assert_eq!(recorded.queries[0].get("base64_encoded").map(String::as_str), Some("true"));
    assert_eq!(recorded.auth[0].as_deref(), Some("secret"));

    let body = &recorded.bodies[0];
    assert_eq!(body["language_id"], 71);
    assert_eq!(body["source_code"], general_purpose::STANDARD.encode("print(1)"));
    assert_eq!(body["stdin"], general_purpose::STANDARD.encode("in"));
    assert!(body["compiler_options"].is_null());
    assert!(body["command_line_arguments"].is_null());
}

#[tokio::test]
async fn test_fetch_decodes_result() {
    let (judge, state) = spawn_judge().await;

    let result = judge.fetch("abc-123").await.unwrap();
    assert_eq!(result.stdout, "1\n");
    assert_eq!(result.stderr, "");
    assert_eq!(result.compile_output, "");
    assert!(result.status.is_accepted());
    assert_eq!(result.time.as_deref(), Some("0.004"));
    assert_eq!(result.memory, Some(3012));
    assert_eq!(result.language.map(|l| l.id), Some(71));
    assert_eq!(result.token, "abc-123");

    let recorded = state.lock().unwrap();
    assert_eq!(recorded.queries[0].get("fields").map(String::as_str), Some("*"));
    assert_eq!(recorded.queries[0].get("base64_encoded").map(String::as_str), Some("true"));
}

#[tokio::test]
async fn test_batch_create_returns_tokens_in_order() {
    let (judge, state) = spawn_judge().await;

    let batch = vec![Submission::new("a", 63), Submission::new("b", 63), Submission::new("c", 63)];
    let tokens = judge.create_batch(&batch).await.unwrap();
    assert_eq!(tokens, vec!["t0", "t1", "t2"]);

    let recorded = state.lock().unwrap();
    let sent = recorded.bodies[0]["submissions"].as_array().unwrap();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[1]["source_code"], general_purpose::STANDARD.encode("b"));
}

#[tokio::test]
async fn test_server_error_becomes_status_error() {
    let (judge, _) = spawn_judge().await;

    match judge.fetch("broken").await {
        Err(JudgeError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_base64_becomes_decode_error() {
    let (judge, _) = spawn_judge().await;

    let err = judge.fetch("garbled").await.unwrap_err();
    assert!(matches!(err, JudgeError::Decode { field: "stdout", .. }), "{err:?}");
}
