use super::{argument_list, has_print_statement, is_true, quote, render_elements, LanguageTemplate};
use arbiter_common::types::{InputType, Language, ScalarType, TestCaseInput};

const PRINT_MARKERS: &[&str] = &["print("];

const PRINTER: &str = r#"def _format_output(value):
    if isinstance(value, bool):
        return "true" if value else "false"
    if isinstance(value, (list, tuple)):
        return "[" + ",".join(_format_element(item) for item in value) + "]"
    return str(value)


def _format_element(value):
    if isinstance(value, str):
        return '"' + value + '"'
    return _format_output(value)
"#;

pub struct PythonTemplate;

impl PythonTemplate {
    fn scalar_literal(scalar: ScalarType, value: &str) -> String {
        let value = value.trim();
        match scalar {
            ScalarType::Int => value.to_string(),
            ScalarType::Float | ScalarType::Double => {
                if value.contains(['.', 'e', 'E']) {
                    value.to_string()
                } else {
                    format!("{}.0", value)
                }
            }
            ScalarType::String => quote(value),
            ScalarType::Bool => {
                if is_true(value) {
                    "True".to_string()
                } else {
                    "False".to_string()
                }
            }
        }
    }

    /// Whether the `def function_name(...)` signature takes `self`
    fn is_method(source: &str, function_name: &str) -> bool {
        let marker = format!("def {}(", function_name);
        source
            .find(&marker)
            .map(|start| {
                let params = &source[start + marker.len()..];
                let end = params.find(')').unwrap_or(params.len());
                params[..end].contains("self")
            })
            .unwrap_or(false)
    }
}

impl LanguageTemplate for PythonTemplate {
    fn language(&self) -> Language {
        Language::Python
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
        let call = if Self::is_method(source, function_name) {
            format!("Solution().{}({})", function_name, argument_list(args))
        } else {
            format!("{}({})", function_name, argument_list(args))
        };

        // typing names (List, Optional, ...) appear in most solution signatures
        let mut program = String::from("from typing import *\n\n");
        program.push_str(source);
        program.push_str("\n\n\n");
        program.push_str(PRINTER);
        program.push_str("\n\n");

        for arg in args {
            program.push_str(&format!(
                "{} = {}\n",
                arg.name,
                self.render_literal(arg.kind, &arg.value)
            ));
        }

        if has_print_statement(source, PRINT_MARKERS) {
            program.push_str(&format!("{}\n", call));
        } else {
            program.push_str(&format!("result = {}\n", call));
            program.push_str("print(_format_output(result))\n");
        }
        program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::tests::input;

    #[test]
    fn test_literals() {
        let t = PythonTemplate;
        assert_eq!(t.render_literal(InputType::Float, "3"), "3.0");
        assert_eq!(t.render_literal(InputType::Double, "3.25"), "3.25");
        assert_eq!(t.render_literal(InputType::Double, "1e5"), "1e5");
        assert_eq!(t.render_literal(InputType::Bool, "true"), "True");
        assert_eq!(t.render_literal(InputType::Bool, "false"), "False");
        assert_eq!(t.render_literal(InputType::BoolArray, "[true,false]"), "[True, False]");
        assert_eq!(t.render_literal(InputType::DoubleArray, "[1,2.5]"), "[1.0, 2.5]");
        assert_eq!(t.render_literal(InputType::StringArray, "[\"a\",b]"), "[\"a\", \"b\"]");
    }

    #[test]
    fn test_method_signature_detection() {
        let method = "class Solution:\n    def twoSum(self, nums: List[int], target: int) -> List[int]:\n        pass";
        let function = "def twoSum(nums, target):\n    return [0, 1]\n\nclass Helper:\n    def run(self):\n        pass";

        assert!(PythonTemplate::is_method(method, "twoSum"));
        assert!(!PythonTemplate::is_method(function, "twoSum"));
        assert!(!PythonTemplate::is_method("x = 1", "twoSum"));
    }

    #[test]
    fn test_harness_instantiates_solution_for_methods() {
        let source = "class Solution:\n    def twoSum(self, nums, target):\n        return [0, 1]";
        let args = [
            input("nums", InputType::IntArray, "[2,7,11,15]"),
            input("target", InputType::Int, "9"),
        ];
        let program = PythonTemplate.render_harness(source, "twoSum", &args);

        assert!(program.starts_with("from typing import *\n\nclass Solution:"));
        assert!(program.contains("nums = [2, 7, 11, 15]\ntarget = 9\n"));
        assert!(program.contains("result = Solution().twoSum(nums, target)\n"));
        assert!(program.ends_with("print(_format_output(result))\n"));
    }

    #[test]
    fn test_harness_calls_plain_function() {
        let source = "def greet(name):\n    return 'hi ' + name";
        let program = PythonTemplate.render_harness(source, "greet", &[input("name", InputType::String, "bob")]);
        assert!(program.contains("name = \"bob\"\n"));
        assert!(program.contains("result = greet(name)\n"));
    }

    #[test]
    fn test_harness_respects_existing_print() {
        let source = "def greet(name):\n    print('hi', name)";
        let program = PythonTemplate.render_harness(source, "greet", &[input("name", InputType::String, "bob")]);
        assert!(program.ends_with("greet(name)\n"));
        assert!(!program.contains("result ="));
    }
}
