use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Failures talking to the remote judge
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("judge request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("judge responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode `{field}` from judge response: {reason}")]
    Decode { field: &'static str, reason: String },

    #[error("unexpected judge response: {0}")]
    Protocol(String),

    #[error("submission {token} did not reach a terminal status within {waited:?}")]
    Timeout { token: String, waited: Duration },

    #[error("{failed} of {total} submissions failed: {source}")]
    Batch {
        failed: usize,
        total: usize,
        #[source]
        source: Box<JudgeError>,
    },
}

impl JudgeError {
    /// Whether the client gave up waiting (possibly inside a batch)
    pub fn is_timeout(&self) -> bool {
        match self {
            JudgeError::Timeout { .. } => true,
            JudgeError::Batch { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

/// Failures of the run orchestrators
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{0}")]
    Validation(String),

    #[error("problem {0} not found")]
    ProblemNotFound(Uuid),

    #[error("no test cases found for problem {0}")]
    NoTestCases(Uuid),

    #[error(transparent)]
    Judge(#[from] JudgeError),

    #[error("problem store error: {0:#}")]
    Store(anyhow::Error),
}

impl RunError {
    pub fn validation(message: impl Into<String>) -> Self {
        RunError::Validation(message.into())
    }
}
