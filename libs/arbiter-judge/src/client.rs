/// Submission Client - Remote Judge Protocol
///
/// **Core Responsibility:**
/// Move a `Submission` to a terminal `SubmissionResult`, one at a time or in
/// batches, with bounded latency and a bounded total wait.
///
/// **Protocol:**
/// - Create: base64-encode source and stdin, POST, receive an opaque token
/// - Poll: GET the token with every field base64-encoded, decode the text fields
/// - Wait: one optimistic poll, then exponential backoff until a terminal
///   status or the wait ceiling
/// - Batch: every submission waited on concurrently, results index-aligned
///   with the input, all-or-nothing on failure
///
/// The judge itself sits behind the `JudgeApi` trait so the protocol can be
/// exercised without a network.

use crate::error::JudgeError;
use arbiter_common::config::{BackoffConfig, JudgeConfig};
use arbiter_common::types::{JudgeLanguage, JudgeStatus, Submission, SubmissionResult};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use futures_util::stream::{self, StreamExt};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, instrument, warn};

/// Raw operations of the remote judge
#[async_trait]
pub trait JudgeApi: Send + Sync {
    /// Create one submission and return its token
    async fn create(&self, submission: &Submission) -> Result<String, JudgeError>;

    /// Create several submissions in one call; tokens come back in input order
    async fn create_batch(&self, submissions: &[Submission]) -> Result<Vec<String>, JudgeError>;

    /// Fetch the current state of a submission
    async fn fetch(&self, token: &str) -> Result<SubmissionResult, JudgeError>;
}

/// `JudgeApi` over HTTP
pub struct HttpJudge {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateSubmissionBody<'a> {
    source_code: String,
    language_id: u32,
    compiler_options: Option<&'a str>,
    command_line_arguments: Option<&'a str>,
    stdin: String,
}

impl<'a> CreateSubmissionBody<'a> {
    fn encode(submission: &'a Submission) -> Self {
        Self {
            source_code: general_purpose::STANDARD.encode(&submission.source_code),
            language_id: submission.language_id,
            compiler_options: submission.compiler_options.as_deref(),
            command_line_arguments: submission.command_line_arguments.as_deref(),
            stdin: general_purpose::STANDARD.encode(&submission.stdin),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateBatchBody<'a> {
    submissions: Vec<CreateSubmissionBody<'a>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Submission as the judge returns it: text fields base64, most fields nullable
#[derive(Debug, Default, Deserialize)]
struct RawSubmissionResult {
    stdout: Option<String>,
    stderr: Option<String>,
    compile_output: Option<String>,
    message: Option<String>,
    exit_code: Option<i32>,
    status: Option<JudgeStatus>,
    time: Option<String>,
    memory: Option<u64>,
    language: Option<JudgeLanguage>,
    token: Option<String>,
}

impl RawSubmissionResult {
    fn decode(self, token: &str) -> Result<SubmissionResult, JudgeError> {
        Ok(SubmissionResult {
            stdout: decode_field("stdout", self.stdout)?,
            stderr: decode_field("stderr", self.stderr)?,
            compile_output: decode_field("compile_output", self.compile_output)?,
            message: decode_field("message", self.message)?,
            exit_code: self.exit_code,
            status: self.status.unwrap_or_default(),
            time: self.time,
            memory: self.memory,
            language: self.language,
            token: self.token.unwrap_or_else(|| token.to_string()),
        })
    }
}

fn decode_field(field: &'static str, value: Option<String>) -> Result<String, JudgeError> {
    let Some(encoded) = value else {
        return Ok(String::new());
    };

    // The judge wraps long base64 payloads across lines
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| JudgeError::Decode {
            field,
            reason: e.to_string(),
        })?;

    String::from_utf8(bytes).map_err(|e| JudgeError::Decode {
        field,
        reason: e.to_string(),
    })
}

/// Turn a response outside `accepted` into `JudgeError::Status`, keeping the body for diagnosis
async fn ensure_status(
    response: reqwest::Response,
    accepted: impl Fn(StatusCode) -> bool,
) -> Result<reqwest::Response, JudgeError> {
    let status = response.status();
    if accepted(status) {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(JudgeError::Status {
        status: status.as_u16(),
        body,
    })
}

impl HttpJudge {
    pub fn new(config: &JudgeConfig) -> Result<Self, JudgeError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.auth_token {
            Some(token) => builder.header("X-Auth-Token", token),
            None => builder,
        }
    }
}

#[async_trait]
impl JudgeApi for HttpJudge {
    async fn create(&self, submission: &Submission) -> Result<String, JudgeError> {
        let url = format!("{}/submissions?base64_encoded=true", self.base_url);
        let response = self
            .request(reqwest::Method::POST, url)
            .json(&CreateSubmissionBody::encode(submission))
            .send()
            .await?;

        let response = ensure_status(response, |s| s.is_success()).await?;
        let created: TokenResponse = response.json().await?;
        Ok(created.token)
    }

    async fn create_batch(&self, submissions: &[Submission]) -> Result<Vec<String>, JudgeError> {
        let url = format!("{}/submissions/batch?base64_encoded=true", self.base_url);
        let body = CreateBatchBody {
            submissions: submissions.iter().map(CreateSubmissionBody::encode).collect(),
        };
        let response = self
            .request(reqwest::Method::POST, url)
            .json(&body)
            .send()
            .await?;

        let response = ensure_status(response, |s| s.is_success()).await?;
        let created: Vec<TokenResponse> = response.json().await?;
        if created.len() != submissions.len() {
            return Err(JudgeError::Protocol(format!(
                "batch create returned {} tokens for {} submissions",
                created.len(),
                submissions.len()
            )));
        }

        Ok(created.into_iter().map(|c| c.token).collect())
    }

    async fn fetch(&self, token: &str) -> Result<SubmissionResult, JudgeError> {
        let url = format!(
            "{}/submissions/{}?base64_encoded=true&fields=*",
            self.base_url, token
        );
        let response = self.request(reqwest::Method::GET, url).send().await?;

        let response = ensure_status(response, |s| s == StatusCode::OK).await?;
        let raw: RawSubmissionResult = response.json().await?;
        raw.decode(token)
    }
}

/// Judge client with polling, backoff and bounded fan-out
#[derive(Clone)]
pub struct SubmissionClient {
    judge: Arc<dyn JudgeApi>,
    backoff: BackoffConfig,
    /// Submissions of one batch waited on at the same time
    max_concurrency: usize,
    use_batch_endpoint: bool,
}

impl SubmissionClient {
    pub fn new(judge: Arc<dyn JudgeApi>, config: &JudgeConfig) -> Self {
        Self {
            judge,
            backoff: config.backoff,
            max_concurrency: config.max_concurrency.max(1),
            use_batch_endpoint: config.use_batch_endpoint,
        }
    }

    /// Client talking HTTP to `config.base_url`
    pub fn from_config(config: &JudgeConfig) -> Result<Self, JudgeError> {
        let judge = HttpJudge::new(config)?;
        Ok(Self::new(Arc::new(judge), config))
    }

    pub async fn create(&self, submission: &Submission) -> Result<String, JudgeError> {
        self.judge.create(submission).await
    }

    pub async fn poll(&self, token: &str) -> Result<SubmissionResult, JudgeError> {
        self.judge.fetch(token).await
    }

    /// Create one submission and wait for its terminal result
    #[instrument(skip_all, fields(language_id = submission.language_id))]
    pub async fn create_and_wait(&self, submission: &Submission) -> Result<SubmissionResult, JudgeError> {
        let token = self.create(submission).await?;
        debug!(token = %token, "Submission created");
        self.wait_for(&token).await
    }

    /// Poll `token` until the judge reports a terminal status or the wait ceiling passes
    pub async fn wait_for(&self, token: &str) -> Result<SubmissionResult, JudgeError> {
        let started = Instant::now();

        // Fast judges are often done by the time the first poll arrives
        let result = self.poll(token).await?;
        if result.status.is_terminal() {
            return Ok(result);
        }

        let mut delay = self.backoff.initial_delay;
        loop {
            let waited = started.elapsed();
            if waited > self.backoff.ceiling {
                warn!(token = %token, waited_ms = waited.as_millis() as u64, "Gave up waiting for submission");
                return Err(JudgeError::Timeout {
                    token: token.to_string(),
                    waited,
                });
            }

            sleep(delay).await;

            let result = self.poll(token).await?;
            if result.status.is_terminal() {
                debug!(
                    token = %token,
                    status = %result.status.description,
                    waited_ms = started.elapsed().as_millis() as u64,
                    "Submission finished"
                );
                return Ok(result);
            }

            delay = self.backoff.next_delay(delay);
        }
    }

    /// Run every submission to completion concurrently.
    ///
    /// Results are aligned with `submissions` by index. If any single
    /// submission fails the whole batch fails and partial results are dropped.
    #[instrument(skip_all, fields(submissions = submissions.len(), batch_endpoint = self.use_batch_endpoint))]
    pub async fn create_batch_and_wait(
        &self,
        submissions: &[Submission],
    ) -> Result<Vec<SubmissionResult>, JudgeError> {
        if submissions.is_empty() {
            return Ok(Vec::new());
        }

        // `buffered` yields in input order while running up to `max_concurrency` at once
        let outcomes: Vec<_> = if self.use_batch_endpoint {
            let tokens = self.judge.create_batch(submissions).await?;
            stream::iter(tokens.iter().map(|token| self.wait_for(token)).collect::<Vec<_>>())
                .buffered(self.max_concurrency)
                .collect()
                .await
        } else {
            stream::iter(submissions.iter().map(|submission| self.create_and_wait(submission)).collect::<Vec<_>>())
                .buffered(self.max_concurrency)
                .collect()
                .await
        };

        all_or_nothing(outcomes)
    }
}

fn all_or_nothing(
    outcomes: Vec<Result<SubmissionResult, JudgeError>>,
) -> Result<Vec<SubmissionResult>, JudgeError> {
    let total = outcomes.len();
    let mut results = Vec::with_capacity(total);
    let mut errors = Vec::new();

    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                error!(index = index, error = %e, "Submission in batch failed");
                errors.push(e);
            }
        }
    }

    if errors.is_empty() {
        return Ok(results);
    }

    let failed = errors.len();
    let first = errors.swap_remove(0);
    Err(JudgeError::Batch {
        failed,
        total,
        source: Box::new(first),
    })
}
