use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Status text used by the platform when a judged run matches its expected output
pub const STATUS_ACCEPTED: &str = "Accepted";
/// Status text used when the judge accepted the run but the output differs
pub const STATUS_WRONG_ANSWER: &str = "Wrong Answer";

/// Target languages the harness generator supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Go,
    Java,
    JavaScript,
    Python,
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Cpp,
        Language::Go,
        Language::Java,
        Language::JavaScript,
        Language::Python,
        Language::TypeScript,
    ];

    /// Parse a language name as sent by clients ("go", "python", "cpp", ...)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "cpp" | "c++" => Some(Language::Cpp),
            "go" | "golang" => Some(Language::Go),
            "java" => Some(Language::Java),
            "javascript" | "js" => Some(Language::JavaScript),
            "python" | "python3" => Some(Language::Python),
            "typescript" | "ts" => Some(Language::TypeScript),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::TypeScript => "typescript",
        }
    }

    /// Language id of the stock judge image (used when languages.json is absent)
    pub fn default_judge_id(&self) -> u32 {
        match self {
            Language::Cpp => 54,
            Language::Go => 60,
            Language::Java => 62,
            Language::JavaScript => 63,
            Language::Python => 71,
            Language::TypeScript => 74,
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Language::Cpp => ".cpp",
            Language::Go => ".go",
            Language::Java => ".java",
            Language::JavaScript => ".js",
            Language::Python => ".py",
            Language::TypeScript => ".ts",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a test case argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputType {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "int[]")]
    IntArray,
    #[serde(rename = "float[]")]
    FloatArray,
    #[serde(rename = "double[]")]
    DoubleArray,
    #[serde(rename = "string[]")]
    StringArray,
    #[serde(rename = "bool[]")]
    BoolArray,
}

impl InputType {
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            InputType::IntArray
                | InputType::FloatArray
                | InputType::DoubleArray
                | InputType::StringArray
                | InputType::BoolArray
        )
    }

    /// Scalar type of the value, or of its elements for array types
    pub fn scalar(&self) -> ScalarType {
        match self {
            InputType::Int | InputType::IntArray => ScalarType::Int,
            InputType::Float | InputType::FloatArray => ScalarType::Float,
            InputType::Double | InputType::DoubleArray => ScalarType::Double,
            InputType::String | InputType::StringArray => ScalarType::String,
            InputType::Bool | InputType::BoolArray => ScalarType::Bool,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Int,
    Float,
    Double,
    String,
    Bool,
}

/// One named argument of a test case; `value` is the literal as text ("[2,7,11,15]")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InputType,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub description: String,
    pub input: Vec<TestCaseInput>,
    pub output: String,
    #[serde(default)]
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: Uuid,
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
}

/// One unit of work for the judge. Plain text here; the client base64-encodes it on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
    pub compiler_options: Option<String>,
    pub command_line_arguments: Option<String>,
}

impl Submission {
    pub fn new(source_code: impl Into<String>, language_id: u32) -> Self {
        Self {
            source_code: source_code.into(),
            language_id,
            ..Default::default()
        }
    }
}

/// Lifecycle stage reported by the judge. Ids below 3 are queued or running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeStatus {
    pub id: u32,
    pub description: String,
}

impl JudgeStatus {
    pub const IN_QUEUE: u32 = 1;
    pub const PROCESSING: u32 = 2;
    pub const ACCEPTED: u32 = 3;
    pub const WRONG_ANSWER: u32 = 4;
    pub const TIME_LIMIT_EXCEEDED: u32 = 5;
    pub const COMPILATION_ERROR: u32 = 6;
    pub const INTERNAL_ERROR: u32 = 13;
    pub const EXEC_FORMAT_ERROR: u32 = 14;

    pub fn new(id: u32, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.id >= Self::ACCEPTED
    }

    pub fn is_accepted(&self) -> bool {
        self.id == Self::ACCEPTED
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeLanguage {
    pub id: u32,
    pub name: String,
}

/// Decoded judge response for one submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub stdout: String,
    pub stderr: String,
    pub compile_output: String,
    pub message: String,
    pub exit_code: Option<i32>,
    pub status: JudgeStatus,
    /// Seconds as a decimal string ("0.012")
    pub time: Option<String>,
    /// Kilobytes
    pub memory: Option<u64>,
    pub language: Option<JudgeLanguage>,
    pub token: String,
}

/// Evaluated outcome of one test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTestCase {
    pub time: Option<String>,
    pub memory: Option<u64>,
    pub status: String,
    pub input: Vec<TestCaseInput>,
    pub output: String,
    pub compile_output: String,
    pub expected_output: String,
}

/// Verdict of an ad-hoc run: every test case evaluated, full breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub status: String,
    pub time: String,
    pub memory: f64,
    pub test_cases: Vec<RunTestCase>,
    pub language: String,
    pub account_id: Option<Uuid>,
    pub problem_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Verdict of a graded submission: stops at the first failing test case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub status: String,
    pub time: String,
    pub memory: f64,
    pub passed_test_cases: usize,
    pub total_test_cases: usize,
    pub failed_test_case: Option<RunTestCase>,
    pub language: String,
    pub account_id: Option<Uuid>,
    pub problem_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// What gets handed to the store once a run or grading pass finishes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SubmissionRecord {
    Run(RunResult),
    Graded(GradeResult),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSolution {
    pub language: String,
    pub source_code: String,
}

/// Cross-language outcome of checking reference solutions against one test case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub status: String,
    pub languages: BTreeMap<Language, RunTestCase>,
}

/// Outcome of checking reference solutions against every test case of a new problem
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemValidation {
    pub status: String,
    pub validated_test_cases: usize,
    pub total_test_cases: usize,
    pub failing_test_case: Option<usize>,
    pub report: Option<ValidationReport>,
}
