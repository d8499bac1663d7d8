// In-process judge for exercising the client and orchestrators without a network

use crate::client::JudgeApi;
use crate::error::JudgeError;
use arbiter_common::types::{JudgeLanguage, JudgeStatus, Submission, SubmissionResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// How the stub treats one submission
#[derive(Debug, Clone)]
pub struct StubOutcome {
    pub result: SubmissionResult,
    /// Number of polls answered with "Processing" before the result
    pub pending_polls: usize,
    pub fetch_delay: Duration,
    pub reject_create: bool,
}

impl StubOutcome {
    pub fn accepted(stdout: &str) -> Self {
        Self::with_status(stdout, JudgeStatus::new(JudgeStatus::ACCEPTED, "Accepted"))
    }

    pub fn with_status(stdout: &str, status: JudgeStatus) -> Self {
        Self {
            result: SubmissionResult {
                stdout: stdout.to_string(),
                status,
                time: Some("0.010".to_string()),
                memory: Some(1024),
                ..SubmissionResult::default()
            },
            pending_polls: 0,
            fetch_delay: Duration::ZERO,
            reject_create: false,
        }
    }

    pub fn rejected() -> Self {
        Self {
            reject_create: true,
            ..Self::accepted("")
        }
    }

    pub fn pending_for(mut self, polls: usize) -> Self {
        self.pending_polls = polls;
        self
    }

    pub fn never_finishes(self) -> Self {
        self.pending_for(usize::MAX)
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub fn language(mut self, id: u32, name: &str) -> Self {
        self.result.language = Some(JudgeLanguage {
            id,
            name: name.to_string(),
        });
        self
    }
}

struct Entry {
    source: String,
    outcome: StubOutcome,
    polls: usize,
}

type Responder = dyn Fn(&Submission) -> StubOutcome + Send + Sync;

pub struct StubJudge {
    responder: Box<Responder>,
    entries: Mutex<HashMap<String, Entry>>,
    created: Mutex<Vec<Submission>>,
    completed: Mutex<Vec<String>>,
    next_token: AtomicUsize,
    fetches: AtomicUsize,
    batch_calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl StubJudge {
    pub fn new(responder: impl Fn(&Submission) -> StubOutcome + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            entries: Mutex::new(HashMap::new()),
            created: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
            next_token: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Every submission the stub accepted, in creation order
    pub fn created(&self) -> Vec<Submission> {
        self.created.lock().unwrap().clone()
    }

    /// Source code of each submission in the order it reached a terminal status
    pub fn completion_order(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    fn register(&self, submission: &Submission) -> Result<String, JudgeError> {
        let outcome = (self.responder)(submission);
        if outcome.reject_create {
            return Err(JudgeError::Status {
                status: 422,
                body: "{\"error\":\"rejected\"}".to_string(),
            });
        }

        let token = format!("token-{}", self.next_token.fetch_add(1, Ordering::SeqCst));
        self.created.lock().unwrap().push(submission.clone());
        self.entries.lock().unwrap().insert(
            token.clone(),
            Entry {
                source: submission.source_code.clone(),
                outcome,
                polls: 0,
            },
        );
        Ok(token)
    }
}

#[async_trait]
impl JudgeApi for StubJudge {
    async fn create(&self, submission: &Submission) -> Result<String, JudgeError> {
        self.register(submission)
    }

    async fn create_batch(&self, submissions: &[Submission]) -> Result<Vec<String>, JudgeError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        submissions.iter().map(|s| self.register(s)).collect()
    }

    async fn fetch(&self, token: &str) -> Result<SubmissionResult, JudgeError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let active = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(active, Ordering::SeqCst);

        let delay = {
            let entries = self.entries.lock().unwrap();
            entries.get(token).map(|e| e.outcome.fetch_delay).unwrap_or_default()
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let response = {
            let mut entries = self.entries.lock().unwrap();
            match entries.get_mut(token) {
                None => Err(JudgeError::Status {
                    status: 404,
                    body: String::new(),
                }),
                Some(entry) if entry.polls < entry.outcome.pending_polls => {
                    entry.polls += 1;
                    Ok(SubmissionResult {
                        status: JudgeStatus::new(JudgeStatus::PROCESSING, "Processing"),
                        token: token.to_string(),
                        ..SubmissionResult::default()
                    })
                }
                Some(entry) => {
                    self.completed.lock().unwrap().push(entry.source.clone());
                    Ok(SubmissionResult {
                        token: token.to_string(),
                        ..entry.outcome.result.clone()
                    })
                }
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }
}
