/// Result Evaluator - Verdicts From Judge Results
///
/// **Core Responsibility:**
/// Compare judge results against expected outputs and reduce them to a verdict.
///
/// **Critical Properties:**
/// - Knows nothing about HTTP or the judge protocol
/// - Knows nothing about language templates
/// - Pure functions: (judge results, test cases) → verdict
/// - Never fails on data shape; unparsable timings count as zero
///
/// **Per-Test-Case Status:**
/// 1. Judge status other than Accepted passes through verbatim
/// 2. Output mismatch or non-empty compile output → "Wrong Answer"
/// 3. Otherwise "Accepted"
///
/// **Aggregation Modes:**
/// - Run: every test case evaluated, full breakdown, distinct failures joined
/// - Grade: test cases in order, stop at the first failure, report only that one

use arbiter_common::types::{
    RunTestCase, SubmissionResult, TestCase, STATUS_ACCEPTED, STATUS_WRONG_ANSWER,
};
use std::collections::BTreeMap;
use tracing::debug;

/// How actual and expected output are canonicalized before comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputPolicy {
    /// Strip spaces from anything containing `[`, strip every newline.
    /// Coarse on purpose: `"a\nb"` and `"ab"` compare equal.
    #[default]
    WhitespaceInsensitiveArray,
    /// Byte-for-byte comparison
    Exact,
}

impl OutputPolicy {
    pub fn normalize(&self, output: &str) -> String {
        match self {
            OutputPolicy::WhitespaceInsensitiveArray => {
                let output = if output.contains('[') {
                    output.replace(' ', "")
                } else {
                    output.to_string()
                };
                output.replace('\n', "")
            }
            OutputPolicy::Exact => output.to_string(),
        }
    }

    pub fn matches(&self, actual: &str, expected: &str) -> bool {
        self.normalize(actual) == self.normalize(expected)
    }
}

/// Status of one test case given the judge's result for it
pub fn determine_test_case_status(
    result: &SubmissionResult,
    expected_output: &str,
    policy: OutputPolicy,
) -> String {
    if !result.status.is_accepted() {
        return result.status.description.clone();
    }

    if !policy.matches(&result.stdout, expected_output) || !result.compile_output.is_empty() {
        return STATUS_WRONG_ANSWER.to_string();
    }

    STATUS_ACCEPTED.to_string()
}

pub fn evaluate_test_case(
    result: &SubmissionResult,
    test_case: &TestCase,
    policy: OutputPolicy,
) -> RunTestCase {
    RunTestCase {
        time: result.time.clone(),
        memory: result.memory,
        status: determine_test_case_status(result, &test_case.output, policy),
        input: test_case.input.clone(),
        output: result.stdout.clone(),
        compile_output: result.compile_output.clone(),
        expected_output: test_case.output.clone(),
    }
}

/// Run-mode verdict before it is stamped with account, problem and language
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub status: String,
    pub time: String,
    pub memory: f64,
    pub test_cases: Vec<RunTestCase>,
    /// Judge language id from the last result in the batch
    pub last_language_id: Option<u32>,
}

/// Grading-mode verdict before it is stamped with account, problem and language
#[derive(Debug, Clone, PartialEq)]
pub struct GradeSummary {
    pub status: String,
    pub time: String,
    pub memory: f64,
    pub passed_test_cases: usize,
    pub total_test_cases: usize,
    pub failed_test_case: Option<RunTestCase>,
    pub last_language_id: Option<u32>,
}

/// Evaluate every test case independently.
///
/// Overall status is "Accepted" only if all cases are; otherwise the distinct
/// non-Accepted statuses, in first-seen order, joined by ",". Time and memory
/// are averaged over every result regardless of its outcome.
pub fn evaluate_run(
    results: &[SubmissionResult],
    test_cases: &[TestCase],
    policy: OutputPolicy,
) -> RunSummary {
    let evaluated: Vec<RunTestCase> = results
        .iter()
        .zip(test_cases)
        .map(|(result, test_case)| evaluate_test_case(result, test_case, policy))
        .collect();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut failures: Vec<&str> = Vec::new();
    for case in &evaluated {
        *counts.entry(case.status.as_str()).or_default() += 1;
        if case.status != STATUS_ACCEPTED && !failures.contains(&case.status.as_str()) {
            failures.push(case.status.as_str());
        }
    }
    debug!(?counts, "Run evaluated");

    let status = if failures.is_empty() {
        STATUS_ACCEPTED.to_string()
    } else {
        failures.join(",")
    };

    RunSummary {
        status,
        time: average_time(results),
        memory: average_memory(results),
        last_language_id: last_language_id(results),
        test_cases: evaluated,
    }
}

/// Evaluate test cases in order and stop at the first failure.
///
/// Cases before the failure count as passed and feed the averages. Without
/// a failure every case is passed, and the reported time and memory are the
/// averages over all cases, not the raw fields of the final judge result.
pub fn evaluate_grade(
    results: &[SubmissionResult],
    test_cases: &[TestCase],
    policy: OutputPolicy,
) -> GradeSummary {
    let total = test_cases.len();

    let failure = results
        .iter()
        .zip(test_cases)
        .enumerate()
        .find_map(|(index, (result, test_case))| {
            let case = evaluate_test_case(result, test_case, policy);
            (case.status != STATUS_ACCEPTED).then_some((index, case))
        });

    match failure {
        Some((index, failed)) => {
            let passed = &results[..index];
            GradeSummary {
                status: failed.status.clone(),
                time: average_time(passed),
                memory: average_memory(passed),
                passed_test_cases: index,
                total_test_cases: total,
                failed_test_case: Some(failed),
                last_language_id: last_language_id(results),
            }
        }
        None => GradeSummary {
            status: STATUS_ACCEPTED.to_string(),
            time: average_time(results),
            memory: average_memory(results),
            passed_test_cases: total,
            total_test_cases: total,
            failed_test_case: None,
            last_language_id: last_language_id(results),
        },
    }
}

/// Mean of the judge's decimal-second timings, three decimals; unparsable timings count as 0
pub fn average_time(results: &[SubmissionResult]) -> String {
    if results.is_empty() {
        return format!("{:.3}", 0.0);
    }

    let total: f64 = results
        .iter()
        .filter_map(|r| r.time.as_deref())
        .filter_map(|t| t.trim().parse::<f64>().ok())
        .sum();
    format!("{:.3}", total / results.len() as f64)
}

/// Mean memory in kilobytes; missing values count as 0
pub fn average_memory(results: &[SubmissionResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let total: u64 = results.iter().filter_map(|r| r.memory).sum();
    total as f64 / results.len() as f64
}

fn last_language_id(results: &[SubmissionResult]) -> Option<u32> {
    results.last().and_then(|r| r.language.as_ref()).map(|l| l.id)
}
