use super::{argument_list, has_print_statement, is_true, quote, render_elements, LanguageTemplate};
use arbiter_common::types::{InputType, Language, ScalarType, TestCaseInput};

pub(super) const PRINT_MARKERS: &[&str] = &["console.log"];

const PRINTER: &str = r#"function formatOutput(value) {
    if (Array.isArray(value)) {
        return "[" + value.map(formatElement).join(",") + "]";
    }
    return String(value);
}

function formatElement(value) {
    return typeof value === "string" ? JSON.stringify(value) : formatOutput(value);
}
"#;

pub struct JavaScriptTemplate;

impl JavaScriptTemplate {
    pub(super) fn scalar_literal(scalar: ScalarType, value: &str) -> String {
        match scalar {
            ScalarType::Int | ScalarType::Float | ScalarType::Double => value.trim().to_string(),
            ScalarType::String => quote(value),
            ScalarType::Bool => is_true(value).to_string(),
        }
    }

    pub(super) fn call(source: &str, function_name: &str, args: &[TestCaseInput]) -> String {
        if source.contains("class Solution") {
            format!("new Solution().{}({})", function_name, argument_list(args))
        } else {
            format!("{}({})", function_name, argument_list(args))
        }
    }
}

impl LanguageTemplate for JavaScriptTemplate {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn render_literal(&self, kind: InputType, value: &str) -> String {
        let scalar = kind.scalar();
        if kind.is_array() {
            format!("[{}]", render_elements(value, |e| Self::scalar_literal(scalar, e)))
        } else {
            Self::scalar_literal(scalar, value)
        }
    }

    fn render_harness(&self, source: &str, function_name: &str, args: &[TestCaseInput]) -> String {
        let call = Self::call(source, function_name, args);

        let mut program = String::from(source);
        program.push_str("\n\n");
        program.push_str(PRINTER);
        // Scoped so argument names never collide with the user's top-level bindings
        program.push_str("\n(function main() {\n");

        for arg in args {
            program.push_str(&format!(
                "    const {} = {};\n",
                arg.name,
                self.render_literal(arg.kind, &arg.value)
            ));
        }

        if has_print_statement(source, PRINT_MARKERS) {
            program.push_str(&format!("    {};\n", call));
        } else {
            program.push_str(&format!("    const result = {};\n", call));
            program.push_str("    console.log(formatOutput(result));\n");
        }

        program.push_str("})();\n");
        program
    }
}
