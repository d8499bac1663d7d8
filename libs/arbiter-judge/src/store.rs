// Problem storage boundary used by the orchestrators
use anyhow::{bail, Context, Result};
use arbiter_common::types::{Problem, SubmissionRecord, TestCase};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Submission records kept by [`InMemoryStore`] before the oldest are dropped
pub const MAX_RECORDED_SUBMISSIONS: usize = 1024;

#[async_trait]
pub trait ProblemStore: Send + Sync {
    async fn get_problem(&self, id: Uuid) -> Result<Option<Problem>>;

    /// Test cases of a problem in their stored order
    async fn get_test_cases(&self, problem_id: Uuid) -> Result<Vec<TestCase>>;

    async fn insert_problem(&self, problem: Problem, test_cases: Vec<TestCase>) -> Result<()>;

    async fn record_submission(&self, record: SubmissionRecord) -> Result<()>;
}

/// A problem together with its test cases, as found in seed files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSeed {
    #[serde(flatten)]
    pub problem: Problem,
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
struct ProblemsJson {
    problems: Vec<ProblemSeed>,
}

pub struct InMemoryStore {
    problems: RwLock<HashMap<Uuid, ProblemSeed>>,
    submissions: RwLock<VecDeque<SubmissionRecord>>,
    history_limit: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            problems: RwLock::default(),
            submissions: RwLock::default(),
            history_limit: MAX_RECORDED_SUBMISSIONS,
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_problems(seeds: impl IntoIterator<Item = ProblemSeed>) -> Self {
        let problems = seeds
            .into_iter()
            .map(|seed| (seed.problem.id, seed))
            .collect();
        Self {
            problems: RwLock::new(problems),
            ..Self::default()
        }
    }

    /// Keep at most `limit` submission records, oldest first out
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Seed from a problems.json file: `{"problems": [{...problem, "testCases": [...]}]}`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Problems file not found: {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let parsed: ProblemsJson = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Self::with_problems(parsed.problems))
    }

    /// Recorded submissions, oldest first
    pub async fn submissions(&self) -> Vec<SubmissionRecord> {
        self.submissions.read().await.iter().cloned().collect()
    }

    pub async fn problem_count(&self) -> usize {
        self.problems.read().await.len()
    }
}

#[async_trait]
impl ProblemStore for InMemoryStore {
    async fn get_problem(&self, id: Uuid) -> Result<Option<Problem>> {
        Ok(self.problems.read().await.get(&id).map(|seed| seed.problem.clone()))
    }

    async fn get_test_cases(&self, problem_id: Uuid) -> Result<Vec<TestCase>> {
        Ok(self
            .problems
            .read()
            .await
            .get(&problem_id)
            .map(|seed| seed.test_cases.clone())
            .unwrap_or_default())
    }

    async fn insert_problem(&self, problem: Problem, test_cases: Vec<TestCase>) -> Result<()> {
        let mut problems = self.problems.write().await;
        if problems.contains_key(&problem.id) {
            bail!("Problem {} already exists", problem.id);
        }
        problems.insert(problem.id, ProblemSeed { problem, test_cases });
        Ok(())
    }

    async fn record_submission(&self, record: SubmissionRecord) -> Result<()> {
        let mut submissions = self.submissions.write().await;
        while submissions.len() >= self.history_limit.max(1) {
            submissions.pop_front();
            debug!("Submission history full, dropped oldest record");
        }
        submissions.push_back(record);
        Ok(())
    }
}
