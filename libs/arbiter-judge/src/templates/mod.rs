/// Language Template Engine
///
/// Turns a structured test case plus user source into a complete program for
/// one target language. Every language renders its own literals and its own
/// entry point; nothing here performs I/O.
///
/// The generated program embeds the user's source verbatim, declares one
/// variable per test case input, calls the requested function and prints the
/// result in the platform's output format (`[a,b]` for arrays, quoted
/// strings inside arrays, lowercase booleans).

mod cpp;
mod go;
mod java;
mod javascript;
mod python;
mod typescript;

pub use cpp::CppTemplate;
pub use go::GoTemplate;
pub use java::JavaTemplate;
pub use javascript::JavaScriptTemplate;
pub use python::PythonTemplate;
pub use typescript::TypeScriptTemplate;

use arbiter_common::types::{InputType, Language, Submission, TestCase, TestCaseInput};

/// Per-language literal rendering and harness assembly
pub trait LanguageTemplate: Send + Sync {
    fn language(&self) -> Language;

    /// Render a test case value in this language's literal syntax
    fn render_literal(&self, kind: InputType, value: &str) -> String;

    /// Wrap `source` with an entry point that calls `function_name` with `args`
    fn render_harness(&self, source: &str, function_name: &str, args: &[TestCaseInput]) -> String;
}

static CPP: CppTemplate = CppTemplate;
static GO: GoTemplate = GoTemplate;
static JAVA: JavaTemplate = JavaTemplate {
    sort_int_pairs: true,
};
static JAVASCRIPT: JavaScriptTemplate = JavaScriptTemplate;
static PYTHON: PythonTemplate = PythonTemplate;
static TYPESCRIPT: TypeScriptTemplate = TypeScriptTemplate;

/// Template registered for a language
pub fn template_for(language: Language) -> &'static dyn LanguageTemplate {
    match language {
        Language::Cpp => &CPP,
        Language::Go => &GO,
        Language::Java => &JAVA,
        Language::JavaScript => &JAVASCRIPT,
        Language::Python => &PYTHON,
        Language::TypeScript => &TYPESCRIPT,
    }
}

/// Full program text for one test case
pub fn generate_program(
    language: Language,
    function_name: &str,
    source_code: &str,
    test_case: &TestCase,
) -> String {
    let template = template_for(language);
    debug_assert_eq!(template.language(), language);
    template.render_harness(source_code, function_name, &test_case.input)
}

/// Judge submission for one test case; `language_id` comes from the language registry
pub fn build_submission(
    language: Language,
    language_id: u32,
    function_name: &str,
    source_code: &str,
    test_case: &TestCase,
) -> Submission {
    Submission::new(
        generate_program(language, function_name, source_code, test_case),
        language_id,
    )
}

/// Elements of a bracket-delimited, comma-separated value ("[1, 2]" -> ["1", "2"])
pub(crate) fn split_array(value: &str) -> Vec<&str> {
    let inner = value.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    if inner.trim().is_empty() {
        return Vec::new();
    }

    inner.split(',').map(str::trim).collect()
}

/// Drop one pair of surrounding quotes, if present
pub(crate) fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Double-quoted string literal; the escapes are shared by every supported language
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in unquote(value).chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub(crate) fn is_true(value: &str) -> bool {
    unquote(value).eq_ignore_ascii_case("true")
}

/// Substring check for an existing output statement in user code.
/// Deliberately not a parse: a marker inside a comment or string also counts.
pub(crate) fn has_print_statement(source: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| source.contains(marker))
}

/// Comma-separated argument names, in test case order
pub(crate) fn argument_list(args: &[TestCaseInput]) -> String {
    args.iter()
        .map(|arg| arg.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render every element of an array value with `render` and join with ", "
pub(crate) fn render_elements(value: &str, render: impl Fn(&str) -> String) -> String {
    split_array(value)
        .into_iter()
        .map(render)
        .collect::<Vec<_>>()
        .join(", ")
}
