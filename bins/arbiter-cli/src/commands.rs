// CLI commands for inspecting and exercising the judging pipeline
use anyhow::{bail, Context, Result};
use arbiter_common::config::JudgeConfig;
use arbiter_common::types::{Language, TestCase};
use arbiter_judge::templates::generate_program;
use arbiter_judge::{Executor, InMemoryStore, LanguageRegistry, ProblemSeed, RunRequest, SubmissionClient};
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Inline JSON, or `@path` to a JSON file
fn parse_test_case(arg: &str) -> Result<TestCase> {
    let json = match arg.strip_prefix('@') {
        Some(path) => read_source(Path::new(path))?,
        None => arg.to_string(),
    };
    serde_json::from_str(&json).context("Failed to parse test case JSON")
}

fn load_problem(path: &Path) -> Result<ProblemSeed> {
    let content = read_source(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse problem file {}", path.display()))
}

/// List all enabled languages
pub fn list_languages() -> Result<()> {
    let registry = LanguageRegistry::load_default()?;
    let languages = registry.list_languages();

    println!("📋 Enabled Languages:\n");
    println!("{:<12} {:<12} {:<10} {:<10}", "Name", "Version", "Judge ID", "Extension");
    println!("{}", "─".repeat(48));

    for lang in &languages {
        println!(
            "{:<12} {:<12} {:<10} {:<10}",
            lang.name, lang.version, lang.judge_language_id, lang.file_extension
        );
    }

    println!("\n✅ Total: {} language(s)", languages.len());
    Ok(())
}

/// Print the generated harness for one test case without executing it
pub fn render(language: &str, function: &str, source: &Path, test_case: &str) -> Result<()> {
    let registry = LanguageRegistry::load_default()?;
    let source_code = read_source(source)?;
    let test_case = parse_test_case(test_case)?;

    let program = render_program(&registry, language, function, &source_code, &test_case)?;
    println!("{}", program);
    Ok(())
}

fn render_program(
    registry: &LanguageRegistry,
    language: &str,
    function: &str,
    source_code: &str,
    test_case: &TestCase,
) -> Result<String> {
    let Some(language) = Language::parse(language) else {
        bail!("Unsupported language: {}", language);
    };
    if !registry.is_enabled(language) {
        bail!("Language {} is not enabled in languages.json", language);
    }

    Ok(generate_program(language, function, source_code, test_case))
}

/// Run (or grade) a local solution against a problem file and print the verdict as JSON
pub async fn run(problem_path: &Path, language: &str, source: &Path, grade: bool) -> Result<()> {
    let seed = load_problem(problem_path)?;
    let problem_id = seed.problem.id;
    let source_code = read_source(source)?;

    let registry = LanguageRegistry::load_default()?;
    let config = JudgeConfig::from_env();
    let client = SubmissionClient::from_config(&config)?;
    let store = InMemoryStore::with_problems([seed]);
    let executor = Executor::new(client, Arc::new(registry), Arc::new(store));

    eprintln!("🚀 Sending {} solution to {}", language, config.base_url);

    let request = RunRequest {
        problem_id: Some(problem_id),
        language: language.to_string(),
        source_code,
        account_id: None,
    };

    let verdict = if grade {
        serde_json::to_string_pretty(&executor.submit_code(&request).await?)?
    } else {
        serde_json::to_string_pretty(&executor.run_code(&request).await?)?
    };

    println!("{}", verdict);
    Ok(())
}
