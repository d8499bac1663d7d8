use super::{argument_list, has_print_statement, is_true, quote, render_elements, LanguageTemplate};
use arbiter_common::types::{InputType, Language, ScalarType, TestCaseInput};

const PRINT_MARKERS: &[&str] = &["cout", "printf", "puts("];

const PRINTER: &str = r#"template <typename T> string formatOutput(const T& value);
template <typename T> string formatOutput(const vector<T>& values);
string formatOutput(const string& value);
template <typename T> string formatElement(const T& value);
string formatElement(const string& value);

template <typename T> string formatOutput(const T& value) {
    ostringstream out;
    out << boolalpha << value;
    return out.str();
}

template <typename T> string formatOutput(const vector<T>& values) {
    string out = "[";
    for (size_t i = 0; i < values.size(); i++) {
        if (i > 0) out += ",";
        out += formatElement(values[i]);
    }
    return out + "]";
}

string formatOutput(const string& value) {
    return value;
}

template <typename T> string formatElement(const T& value) {
    return formatOutput(value);
}

string formatElement(const string& value) {
    return "\"" + value + "\"";
}
"#;

pub struct CppTemplate;

impl CppTemplate {
    fn scalar_type(scalar: ScalarType) -> &'static str {
        match scalar {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::String => "string",
            ScalarType::Bool => "bool",
        }
    }

    fn declared_type(kind: InputType) -> String {
        let scalar = Self::scalar_type(kind.scalar());
        if kind.is_array() {
            format!("vector<{}>", scalar)
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
}

impl LanguageTemplate for CppTemplate {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn render_literal(&self, kind: InputType, value: &str) -> String {
        let scalar = kind.scalar();
        if kind.is_array() {
            format!("{{{}}}", render_elements(value, |e| Self::scalar_literal(scalar, e)))
        } else {
            Self::scalar_literal(scalar, value)
        }
    }

    fn render_harness(&self, source: &str, function_name: &str, args: &[TestCaseInput]) -> String {
        let call = if source.contains("class Solution") {
            format!("Solution().{}({})", function_name, argument_list(args))
        } else {
            format!("{}({})", function_name, argument_list(args))
        };

        let mut program = String::from("#include <bits/stdc++.h>\nusing namespace std;\n\n");
        program.push_str(source);
        program.push_str("\n\n");
        program.push_str(PRINTER);
        program.push_str("\nint main() {\n");

        for arg in args {
            program.push_str(&format!(
                "    {} {} = {};\n",
                Self::declared_type(arg.kind),
                arg.name,
                self.render_literal(arg.kind, &arg.value)
            ));
        }

        if has_print_statement(source, PRINT_MARKERS) {
            program.push_str(&format!("    {};\n", call));
        } else {
            program.push_str(&format!("    auto result = {};\n", call));
            program.push_str("    cout << formatOutput(result) << endl;\n");
        }

        program.push_str("    return 0;\n}\n");
        program
    }
}
