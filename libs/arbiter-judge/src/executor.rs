/// Run Orchestrators - End-to-End Request Handling
///
/// **Core Responsibility:**
/// Compose templates, the submission client and the evaluator into the
/// platform's judging workflows.
///
/// **Workflows:**
/// - Run: validate → load problem → one submission per test case → batch →
///   run-mode verdict
/// - Submit: same pipeline, grading-mode verdict (stops at first failure)
/// - Reference validation: every language's solution against one test case,
///   concurrently, reduced to one cross-language status
/// - Problem creation: reference validation per test case in order; the
///   problem is stored only if every test case passes
///
/// Validation failures are reported before any judge call is made.

use crate::client::SubmissionClient;
use crate::config::LanguageRegistry;
use crate::error::{JudgeError, RunError};
use crate::evaluator::{evaluate_grade, evaluate_run, evaluate_test_case, OutputPolicy};
use crate::store::ProblemStore;
use crate::templates::build_submission;
use arbiter_common::types::{
    GradeResult, Language, Problem, ProblemValidation, ReferenceSolution, RunResult, RunTestCase,
    Submission, SubmissionRecord, TestCase, ValidationReport, STATUS_ACCEPTED, STATUS_WRONG_ANSWER,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// A user's code for a stored problem, as sent to "run" and "submit"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub problem_id: Option<Uuid>,
    pub language: String,
    pub source_code: String,
    #[serde(default)]
    pub account_id: Option<Uuid>,
}

/// Reference solutions checked against a single test case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub function_name: String,
    pub test_case: TestCase,
    pub solutions: Vec<ReferenceSolution>,
}

/// A problem proposed by an admin, with reference solutions proving its test cases
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProblem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: String,
    pub function_name: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub points: u32,
    pub test_cases: Vec<TestCase>,
    pub solutions: Vec<ReferenceSolution>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemCreation {
    /// Present only when every test case validated and the problem was stored
    pub problem: Option<Problem>,
    pub validation: ProblemValidation,
}

/// Validated inputs of a run or submit request
struct Prepared {
    problem: Problem,
    test_cases: Vec<TestCase>,
    language: Language,
    submissions: Vec<Submission>,
}

#[derive(Clone)]
pub struct Executor {
    client: SubmissionClient,
    registry: Arc<LanguageRegistry>,
    store: Arc<dyn ProblemStore>,
    policy: OutputPolicy,
}

impl Executor {
    pub fn new(
        client: SubmissionClient,
        registry: Arc<LanguageRegistry>,
        store: Arc<dyn ProblemStore>,
    ) -> Self {
        Self {
            client,
            registry,
            store,
            policy: OutputPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: OutputPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Run user code against every test case of a problem; full breakdown
    #[instrument(skip_all, fields(problem_id = ?request.problem_id, language = %request.language))]
    pub async fn run_code(&self, request: &RunRequest) -> Result<RunResult, RunError> {
        let prepared = self.prepare(request).await?;
        info!(test_cases = prepared.test_cases.len(), "Running submission");

        let results = self.client.create_batch_and_wait(&prepared.submissions).await?;
        let summary = evaluate_run(&results, &prepared.test_cases, self.policy);

        let run = RunResult {
            status: summary.status,
            time: summary.time,
            memory: summary.memory,
            test_cases: summary.test_cases,
            language: self.reported_language(summary.last_language_id, prepared.language),
            account_id: request.account_id,
            problem_id: prepared.problem.id,
            created_at: Utc::now(),
        };
        info!(status = %run.status, time = %run.time, "Run finished");

        self.store
            .record_submission(SubmissionRecord::Run(run.clone()))
            .await
            .map_err(RunError::Store)?;
        Ok(run)
    }

    /// Grade user code: test cases in order, only the first failure is reported
    #[instrument(skip_all, fields(problem_id = ?request.problem_id, language = %request.language))]
    pub async fn submit_code(&self, request: &RunRequest) -> Result<GradeResult, RunError> {
        let prepared = self.prepare(request).await?;
        info!(test_cases = prepared.test_cases.len(), "Grading submission");

        let results = self.client.create_batch_and_wait(&prepared.submissions).await?;
        let summary = evaluate_grade(&results, &prepared.test_cases, self.policy);

        let graded = GradeResult {
            status: summary.status,
            time: summary.time,
            memory: summary.memory,
            passed_test_cases: summary.passed_test_cases,
            total_test_cases: summary.total_test_cases,
            failed_test_case: summary.failed_test_case,
            language: self.reported_language(summary.last_language_id, prepared.language),
            account_id: request.account_id,
            problem_id: prepared.problem.id,
            created_at: Utc::now(),
        };
        info!(
            status = %graded.status,
            passed = graded.passed_test_cases,
            total = graded.total_test_cases,
            "Grading finished"
        );

        self.store
            .record_submission(SubmissionRecord::Graded(graded.clone()))
            .await
            .map_err(RunError::Store)?;
        Ok(graded)
    }

    /// Check every reference solution against one test case, one worker per language.
    ///
    /// Workers report `(language, result)` over a channel; this task is the
    /// only owner of the per-language map. Any language that is not Accepted
    /// makes the overall status "Wrong Answer".
    #[instrument(skip_all, fields(function = %function_name, languages = solutions.len()))]
    pub async fn validate_reference_solutions(
        &self,
        function_name: &str,
        test_case: &TestCase,
        solutions: &[ReferenceSolution],
    ) -> Result<ValidationReport, RunError> {
        let jobs = self.prepare_reference_solutions(function_name, test_case, solutions)?;
        let expected = jobs.len();

        let (tx, mut rx) = mpsc::channel(expected);
        for (language, submission) in jobs {
            let tx = tx.clone();
            let client = self.client.clone();
            let test_case = test_case.clone();
            let policy = self.policy;

            tokio::spawn(async move {
                let outcome = client
                    .create_and_wait(&submission)
                    .await
                    .map(|result| evaluate_test_case(&result, &test_case, policy));
                // Receiver only goes away if the collector was dropped
                let _ = tx.send((language, outcome)).await;
            });
        }
        drop(tx);

        let mut languages: BTreeMap<Language, RunTestCase> = BTreeMap::new();
        let mut failure: Option<JudgeError> = None;
        while let Some((language, outcome)) = rx.recv().await {
            match outcome {
                Ok(case) => {
                    languages.insert(language, case);
                }
                Err(e) => {
                    error!(language = %language, error = %e, "Reference solution could not be judged");
                    failure.get_or_insert(e);
                }
            }
        }

        if let Some(e) = failure {
            return Err(e.into());
        }
        if languages.len() != expected {
            return Err(JudgeError::Protocol(format!(
                "{} of {} validation workers exited without a result",
                expected - languages.len(),
                expected
            ))
            .into());
        }

        let status = reduce_languages(&languages);
        info!(status = %status, "Reference solutions validated");
        Ok(ValidationReport { status, languages })
    }

    /// Run the reference validation for each test case in order, stopping at the first failure
    pub async fn validate_problem(
        &self,
        function_name: &str,
        test_cases: &[TestCase],
        solutions: &[ReferenceSolution],
    ) -> Result<ProblemValidation, RunError> {
        if test_cases.is_empty() {
            return Err(RunError::validation("at least one test case is required"));
        }

        let total = test_cases.len();
        for (index, test_case) in test_cases.iter().enumerate() {
            let report = self
                .validate_reference_solutions(function_name, test_case, solutions)
                .await?;

            if report.status != STATUS_ACCEPTED {
                warn!(test_case = index, status = %report.status, "Reference solutions failed");
                return Ok(ProblemValidation {
                    status: report.status.clone(),
                    validated_test_cases: index,
                    total_test_cases: total,
                    failing_test_case: Some(index),
                    report: Some(report),
                });
            }
        }

        Ok(ProblemValidation {
            status: STATUS_ACCEPTED.to_string(),
            validated_test_cases: total,
            total_test_cases: total,
            failing_test_case: None,
            report: None,
        })
    }

    /// Validate a proposed problem and store it when every test case passes
    #[instrument(skip_all, fields(title = %new_problem.title))]
    pub async fn create_problem(&self, new_problem: NewProblem) -> Result<ProblemCreation, RunError> {
        if new_problem.title.trim().is_empty() {
            return Err(RunError::validation("title is required"));
        }

        let validation = self
            .validate_problem(
                &new_problem.function_name,
                &new_problem.test_cases,
                &new_problem.solutions,
            )
            .await?;

        if validation.status != STATUS_ACCEPTED {
            return Ok(ProblemCreation {
                problem: None,
                validation,
            });
        }

        let problem = Problem {
            id: Uuid::new_v4(),
            title: new_problem.title,
            description: new_problem.description,
            difficulty: new_problem.difficulty,
            function_name: new_problem.function_name,
            hints: new_problem.hints,
            points: new_problem.points,
        };
        self.store
            .insert_problem(problem.clone(), new_problem.test_cases)
            .await
            .map_err(RunError::Store)?;
        info!(problem_id = %problem.id, "Problem stored");

        Ok(ProblemCreation {
            problem: Some(problem),
            validation,
        })
    }

    async fn prepare(&self, request: &RunRequest) -> Result<Prepared, RunError> {
        let problem_id = request
            .problem_id
            .ok_or_else(|| RunError::validation("problem id is required"))?;
        let (language, language_id) = self.resolve_language(&request.language)?;
        if request.source_code.trim().is_empty() {
            return Err(RunError::validation("source code is required"));
        }

        let problem = self
            .store
            .get_problem(problem_id)
            .await
            .map_err(RunError::Store)?
            .ok_or(RunError::ProblemNotFound(problem_id))?;

        if !request.source_code.contains(&problem.function_name) {
            return Err(RunError::validation(format!(
                "function `{}` not found in source code",
                problem.function_name
            )));
        }

        let test_cases = self
            .store
            .get_test_cases(problem_id)
            .await
            .map_err(RunError::Store)?;
        if test_cases.is_empty() {
            return Err(RunError::NoTestCases(problem_id));
        }

        let submissions = test_cases
            .iter()
            .map(|test_case| {
                build_submission(
                    language,
                    language_id,
                    &problem.function_name,
                    &request.source_code,
                    test_case,
                )
            })
            .collect();

        Ok(Prepared {
            problem,
            test_cases,
            language,
            submissions,
        })
    }

    fn prepare_reference_solutions(
        &self,
        function_name: &str,
        test_case: &TestCase,
        solutions: &[ReferenceSolution],
    ) -> Result<Vec<(Language, Submission)>, RunError> {
        if function_name.trim().is_empty() {
            return Err(RunError::validation("function name is required"));
        }
        if solutions.is_empty() {
            return Err(RunError::validation("at least one reference solution is required"));
        }

        let mut jobs: Vec<(Language, Submission)> = Vec::with_capacity(solutions.len());
        for solution in solutions {
            let (language, language_id) = self.resolve_language(&solution.language)?;
            if jobs.iter().any(|(seen, _)| *seen == language) {
                return Err(RunError::validation(format!(
                    "more than one reference solution for {}",
                    language
                )));
            }
            if solution.source_code.trim().is_empty() {
                return Err(RunError::validation(format!("{} solution is empty", language)));
            }
            if !solution.source_code.contains(function_name) {
                return Err(RunError::validation(format!(
                    "function `{}` not found in {} solution",
                    function_name, language
                )));
            }

            let submission = build_submission(
                language,
                language_id,
                function_name,
                &solution.source_code,
                test_case,
            );
            jobs.push((language, submission));
        }
        Ok(jobs)
    }

    fn resolve_language(&self, name: &str) -> Result<(Language, u32), RunError> {
        Language::parse(name)
            .and_then(|language| {
                self.registry
                    .judge_language_id(language)
                    .map(|id| (language, id))
            })
            .ok_or_else(|| RunError::validation(format!("unsupported language: {}", name)))
    }

    /// Language named by the last judge response, falling back to the request's
    fn reported_language(&self, last_language_id: Option<u32>, requested: Language) -> String {
        last_language_id
            .and_then(|id| self.registry.language_for_judge_id(id))
            .unwrap_or(requested)
            .to_string()
    }
}

fn reduce_languages(languages: &BTreeMap<Language, RunTestCase>) -> String {
    let all_accepted = languages.values().all(|case| case.status == STATUS_ACCEPTED);
    if all_accepted && !languages.is_empty() {
        STATUS_ACCEPTED.to_string()
    } else {
        STATUS_WRONG_ANSWER.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryStore, ProblemSeed};
    use crate::testing::{StubJudge, StubOutcome};
    use arbiter_common::config::JudgeConfig;
    use arbiter_common::types::{InputType, TestCaseInput, Visibility};

    const GO_TWO_SUM: &str = r#"package main

func twoSum(nums []int, target int) []int {
	seen := map[int]int{}
	for i, n := range nums {
		if j, ok := seen[target-n]; ok {
			return []int{j, i}
		}
		seen[n] = i
	}
	return nil
}"#;

    const PY_TWO_SUM: &str = "def twoSum(nums, target):\n    seen = {}\n    for i, n in enumerate(nums):\n        if target - n in seen:\n            return [seen[target - n], i]\n        seen[n] = i";

    const JS_TWO_SUM: &str = "function twoSum(nums, target) { return [0, 0]; }";

    fn test_case(nums: &str, target: &str, output: &str) -> TestCase {
        TestCase {
            description: String::new(),
            input: vec![
                TestCaseInput {
                    name: "nums".to_string(),
                    kind: InputType::IntArray,
                    value: nums.to_string(),
                },
                TestCaseInput {
                    name: "target".to_string(),
                    kind: InputType::Int,
                    value: target.to_string(),
                },
            ],
            output: output.to_string(),
            visibility: Visibility::Public,
        }
    }

    fn two_sum_cases() -> Vec<TestCase> {
        vec![
            test_case("[2,7,11,15]", "9", "[0,1]"),
            test_case("[3,2,4]", "6", "[1,2]"),
        ]
    }

    /// Pretends to run correct two-sum solutions: answers by the rendered input.
    /// Programs whose source contains "[0, 0]" always print that instead.
    fn two_sum_judge() -> Arc<StubJudge> {
        Arc::new(StubJudge::new(|submission| {
            let program = &submission.source_code;
            let stdout = if program.contains("[0, 0]") {
                "[0,0]\n"
            } else if program.contains("2, 7, 11, 15") {
                "[0,1]\n"
            } else if program.contains("3, 2, 4") {
                "[1,2]\n"
            } else {
                "\n"
            };
            StubOutcome::accepted(stdout)
                .pending_for(1)
                .language(submission.language_id, "stub")
        }))
    }

    fn problem() -> Problem {
        Problem {
            id: Uuid::new_v4(),
            title: "Two Sum".to_string(),
            description: String::new(),
            difficulty: "easy".to_string(),
            function_name: "twoSum".to_string(),
            hints: Vec::new(),
            points: 100,
        }
    }

    fn executor(judge: Arc<StubJudge>, seeds: Vec<ProblemSeed>) -> (Executor, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::with_problems(seeds));
        let client = SubmissionClient::new(judge, &JudgeConfig::default());
        let executor = Executor::new(client, Arc::new(LanguageRegistry::builtin()), store.clone());
        (executor, store)
    }

    fn request(problem_id: Option<Uuid>, language: &str, source: &str) -> RunRequest {
        RunRequest {
            problem_id,
            language: language.to_string(),
            source_code: source.to_string(),
            account_id: Some(Uuid::nil()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_go_two_sum_run_is_accepted() {
        let problem = problem();
        let seed = ProblemSeed {
            problem: problem.clone(),
            test_cases: two_sum_cases(),
        };
        let judge = two_sum_judge();
        let (executor, store) = executor(judge.clone(), vec![seed]);

        let run = executor
            .run_code(&request(Some(problem.id), "go", GO_TWO_SUM))
            .await
            .unwrap();

        assert_eq!(run.status, "Accepted");
        assert_eq!(run.test_cases.len(), 2);
        assert!(run.test_cases.iter().all(|c| c.status == "Accepted"));
        assert_eq!(run.test_cases[1].expected_output, "[1,2]");
        assert_eq!(run.language, "go");
        assert_eq!(run.problem_id, problem.id);

        let created = judge.created();
        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|s| s.language_id == 60));
        assert!(created[0].source_code.starts_with("package main"));
        assert_eq!(store.submissions().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_stops_at_first_failure() {
        let problem = problem();
        let mut cases = two_sum_cases();
        cases.insert(1, test_case("[1,5,9]", "14", "[1,2]"));
        let seed = ProblemSeed {
            problem: problem.clone(),
            test_cases: cases,
        };
        let (executor, store) = executor(two_sum_judge(), vec![seed]);

        let graded = executor
            .submit_code(&request(Some(problem.id), "python", PY_TWO_SUM))
            .await
            .unwrap();

        assert_eq!(graded.status, "Wrong Answer");
        assert_eq!(graded.passed_test_cases, 1);
        assert_eq!(graded.total_test_cases, 3);
        assert_eq!(graded.failed_test_case.unwrap().input[0].value, "[1,5,9]");
        assert_eq!(graded.language, "python");

        match &store.submissions().await[0] {
            SubmissionRecord::Graded(record) => assert_eq!(record.passed_test_cases, 1),
            other => panic!("expected graded record, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validation_happens_before_any_judge_call() {
        let problem = problem();
        let seed = ProblemSeed {
            problem: problem.clone(),
            test_cases: two_sum_cases(),
        };
        let empty = ProblemSeed {
            problem: Problem {
                id: Uuid::new_v4(),
                ..problem.clone()
            },
            test_cases: Vec::new(),
        };
        let empty_id = empty.problem.id;
        let judge = two_sum_judge();
        let (executor, _) = executor(judge.clone(), vec![seed, empty]);

        let cases = [
            request(None, "go", GO_TWO_SUM),
            request(Some(problem.id), "cobol", GO_TWO_SUM),
            request(Some(problem.id), "go", "   "),
            request(Some(problem.id), "go", "func threeSum() {}"),
        ];
        for bad in &cases {
            let err = executor.run_code(bad).await.unwrap_err();
            assert!(matches!(err, RunError::Validation(_)), "{err:?}");
        }

        let missing = Uuid::new_v4();
        let err = executor
            .run_code(&request(Some(missing), "go", GO_TWO_SUM))
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::ProblemNotFound(id) if id == missing));

        let err = executor
            .submit_code(&request(Some(empty_id), "go", GO_TWO_SUM))
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::NoTestCases(id) if id == empty_id));

        assert!(judge.created().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_judge_failure_fails_the_run() {
        let problem = problem();
        let seed = ProblemSeed {
            problem: problem.clone(),
            test_cases: two_sum_cases(),
        };
        let judge = Arc::new(StubJudge::new(|s| {
            if s.source_code.contains("3, 2, 4") {
                StubOutcome::accepted("").never_finishes()
            } else {
                StubOutcome::accepted("[0,1]")
            }
        }));
        let (executor, store) = executor(judge, vec![seed]);

        let err = executor
            .run_code(&request(Some(problem.id), "go", GO_TWO_SUM))
            .await
            .unwrap_err();

        match err {
            RunError::Judge(e) => assert!(e.is_timeout()),
            other => panic!("expected judge error, got {other:?}"),
        }
        assert!(store.submissions().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reference_validation_reports_wrong_answer() {
        let (executor, _) = executor(two_sum_judge(), Vec::new());
        let solutions = vec![
            ReferenceSolution {
                language: "python".to_string(),
                source_code: PY_TWO_SUM.to_string(),
            },
            ReferenceSolution {
                language: "javascript".to_string(),
                source_code: JS_TWO_SUM.to_string(),
            },
        ];

        let report = executor
            .validate_reference_solutions("twoSum", &two_sum_cases()[0], &solutions)
            .await
            .unwrap();

        assert_eq!(report.status, "Wrong Answer");
        assert_eq!(report.languages.len(), 2);
        assert_eq!(report.languages[&Language::Python].status, "Accepted");
        assert_eq!(report.languages[&Language::JavaScript].status, "Wrong Answer");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reference_validation_all_accepted() {
        let (executor, _) = executor(two_sum_judge(), Vec::new());
        let solutions = vec![
            ReferenceSolution {
                language: "go".to_string(),
                source_code: GO_TWO_SUM.to_string(),
            },
            ReferenceSolution {
                language: "python".to_string(),
                source_code: PY_TWO_SUM.to_string(),
            },
        ];

        let report = executor
            .validate_reference_solutions("twoSum", &two_sum_cases()[1], &solutions)
            .await
            .unwrap();
        assert_eq!(report.status, "Accepted");
    }

    #[tokio::test]
    async fn test_reference_validation_rejects_bad_input() {
        let judge = two_sum_judge();
        let (executor, _) = executor(judge.clone(), Vec::new());
        let case = &two_sum_cases()[0];

        let err = executor.validate_reference_solutions("twoSum", case, &[]).await.unwrap_err();
        assert!(matches!(err, RunError::Validation(_)));

        let duplicated = vec![
            ReferenceSolution {
                language: "python".to_string(),
                source_code: PY_TWO_SUM.to_string(),
            },
            ReferenceSolution {
                language: "python3".to_string(),
                source_code: PY_TWO_SUM.to_string(),
            },
        ];
        let err = executor
            .validate_reference_solutions("twoSum", case, &duplicated)
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::Validation(_)));
        assert!(judge.created().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_problem_persists_only_when_validated() {
        let judge = two_sum_judge();
        let (executor, store) = executor(judge, Vec::new());

        let mut proposal = NewProblem {
            title: "Two Sum".to_string(),
            description: String::new(),
            difficulty: "easy".to_string(),
            function_name: "twoSum".to_string(),
            hints: Vec::new(),
            points: 100,
            test_cases: two_sum_cases(),
            solutions: vec![
                ReferenceSolution {
                    language: "go".to_string(),
                    source_code: GO_TWO_SUM.to_string(),
                },
                ReferenceSolution {
                    language: "javascript".to_string(),
                    source_code: JS_TWO_SUM.to_string(),
                },
            ],
        };

        let rejected = executor.create_problem(proposal.clone()).await.unwrap();
        assert!(rejected.problem.is_none());
        assert_eq!(rejected.validation.status, "Wrong Answer");
        assert_eq!(rejected.validation.failing_test_case, Some(0));
        assert_eq!(store.problem_count().await, 0);

        proposal.solutions.pop();
        let created = executor.create_problem(proposal).await.unwrap();
        assert_eq!(created.validation.status, "Accepted");
        assert_eq!(created.validation.validated_test_cases, 2);

        let problem = created.problem.unwrap();
        assert_eq!(store.problem_count().await, 1);
        assert_eq!(store.get_test_cases(problem.id).await.unwrap().len(), 2);
    }

    #[test]
    fn test_reduce_languages() {
        let case = |status: &str| RunTestCase {
            time: None,
            memory: None,
            status: status.to_string(),
            input: Vec::new(),
            output: String::new(),
            compile_output: String::new(),
            expected_output: String::new(),
        };

        let mut map = BTreeMap::new();
        map.insert(Language::Go, case("Accepted"));
        assert_eq!(reduce_languages(&map), "Accepted");

        map.insert(Language::Cpp, case("Compilation Error"));
        assert_eq!(reduce_languages(&map), "Wrong Answer");

        assert_eq!(reduce_languages(&BTreeMap::new()), "Wrong Answer");
    }
}
