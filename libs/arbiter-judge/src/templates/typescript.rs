use super::javascript::{JavaScriptTemplate, PRINT_MARKERS};
use super::{has_print_statement, render_elements, LanguageTemplate};
use arbiter_common::types::{InputType, Language, ScalarType, TestCaseInput};

const PRINTER: &str = r#"function formatOutput(value: any): string {
    if (Array.isArray(value)) {
        return "[" + value.map(formatElement).join(",") + "]";
    }
    return String(value);
}

function formatElement(value: any): string {
    return typeof value === "string" ? JSON.stringify(value) : formatOutput(value);
}
"#;

pub struct TypeScriptTemplate;

impl TypeScriptTemplate {
    fn declared_type(kind: InputType) -> String {
        let scalar = match kind.scalar() {
            ScalarType::Int | ScalarType::Float | ScalarType::Double => "number",
            ScalarType::String => "string",
            ScalarType::Bool => "boolean",
        };
        if kind.is_array() {
            format!("{}[]", scalar)
        } else {
            scalar.to_string()
        }
    }
}

impl LanguageTemplate for TypeScriptTemplate {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    // Literal syntax is shared with JavaScript; only the declarations carry types.
    fn render_literal(&self, kind: InputType, value: &str) -> String {
        let scalar = kind.scalar();
        if kind.is_array() {
            format!(
                "[{}]",
                render_elements(value, |e| JavaScriptTemplate::scalar_literal(scalar, e))
            )
        } else {
            JavaScriptTemplate::scalar_literal(scalar, value)
        }
    }

    fn render_harness(&self, source: &str, function_name: &str, args: &[TestCaseInput]) -> String {
        let call = JavaScriptTemplate::call(source, function_name, args);

        let mut program = String::from(source);
        program.push_str("\n\n");
        program.push_str(PRINTER);
        program.push_str("\n(function main(): void {\n");

        for arg in args {
            program.push_str(&format!(
                "    const {}: {} = {};\n",
                arg.name,
                Self::declared_type(arg.kind),
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
