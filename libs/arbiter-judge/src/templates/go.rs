use super::{argument_list, has_print_statement, is_true, quote, render_elements, LanguageTemplate};
use arbiter_common::types::{InputType, Language, ScalarType, TestCaseInput};

const PRINT_MARKERS: &[&str] = &["fmt.Print"];

// Aliased so the harness never clashes with the user's own imports of the same packages.
const IMPORTS: &str = r#"import (
	hfmt "fmt"
	hreflect "reflect"
	hstrings "strings"
)
"#;

const PRINTER: &str = r#"func formatOutput(value interface{}) string {
	rv := hreflect.ValueOf(value)
	if rv.Kind() == hreflect.Slice || rv.Kind() == hreflect.Array {
		parts := make([]string, rv.Len())
		for i := 0; i < rv.Len(); i++ {
			parts[i] = formatElement(rv.Index(i).Interface())
		}
		return "[" + hstrings.Join(parts, ",") + "]"
	}
	return hfmt.Sprint(value)
}

func formatElement(value interface{}) string {
	if s, ok := value.(string); ok {
		return hfmt.Sprintf("%q", s)
	}
	return formatOutput(value)
}
"#;

pub struct GoTemplate;

impl GoTemplate {
    fn scalar_type(scalar: ScalarType) -> &'static str {
        match scalar {
            ScalarType::Int => "int",
            ScalarType::Float => "float32",
            ScalarType::Double => "float64",
            ScalarType::String => "string",
            ScalarType::Bool => "bool",
        }
    }

    fn declared_type(kind: InputType) -> String {
        let scalar = Self::scalar_type(kind.scalar());
        if kind.is_array() {
            format!("[]{}", scalar)
        } else {
            scalar.to_string()
        }
    }

    fn scalar_literal(scalar: ScalarType, value: &str) -> String {
        match scalar {
            ScalarType::Int | ScalarType::Float | ScalarType::Double => value.trim().to_string(),
            ScalarType::String => quote(value),
            ScalarType::Bool => is_true(value).to_string(),
        }
    }

    /// User source without its package clause; the harness supplies `package main`
    fn strip_package_clause(source: &str) -> String {
        let mut stripped = false;
        source
            .lines()
            .filter(|line| {
                if !stripped && line.trim_start().starts_with("package ") {
                    stripped = true;
                    return false;
                }
                true
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl LanguageTemplate for GoTemplate {
    fn language(&self) -> Language {
        Language::Go
    }

    fn render_literal(&self, kind: InputType, value: &str) -> String {
        let scalar = kind.scalar();
        if kind.is_array() {
            format!(
                "[]{}{{{}}}",
                Self::scalar_type(scalar),
                render_elements(value, |e| Self::scalar_literal(scalar, e))
            )
        } else {
            Self::scalar_literal(scalar, value)
        }
    }

    fn render_harness(&self, source: &str, function_name: &str, args: &[TestCaseInput]) -> String {
        let call = format!("{}({})", function_name, argument_list(args));

        let mut program = String::from("package main\n\n");
        program.push_str(IMPORTS);
        program.push('\n');
        program.push_str(&Self::strip_package_clause(source));
        program.push_str("\n\n");
        program.push_str(PRINTER);
        program.push_str("\nfunc main() {\n");

        for arg in args {
            program.push_str(&format!(
                "\tvar {} {} = {}\n",
                arg.name,
                Self::declared_type(arg.kind),
                self.render_literal(arg.kind, &arg.value)
            ));
        }

        if has_print_statement(source, PRINT_MARKERS) {
            program.push_str(&format!("\t{}\n", call));
        } else {
            program.push_str(&format!("\tresult := {}\n", call));
            program.push_str("\thfmt.Println(formatOutput(result))\n");
        }

        program.push_str("}\n");
        program
    }
}
