use super::{argument_list, has_print_statement, is_true, quote, render_elements, LanguageTemplate};
use arbiter_common::types::{InputType, Language, ScalarType, TestCaseInput};

const PRINT_MARKERS: &[&str] = &["System.out.print"];

const FORMATTER_HEAD: &str = r#"    private static String formatOutput(Object value) {
        if (value == null) {
            return "null";
        }
        if (value instanceof int[]) {
            int[] values = ((int[]) value).clone();
"#;

// Two-element int arrays (index pairs) are reported in ascending order.
const SORT_INT_PAIRS: &str = r#"            if (values.length == 2) {
                Arrays.sort(values);
            }
"#;

const FORMATTER_TAIL: &str = r#"            return Arrays.toString(values);
        }
        if (value instanceof long[]) {
            return Arrays.toString((long[]) value);
        }
        if (value instanceof double[]) {
            return Arrays.toString((double[]) value);
        }
        if (value instanceof float[]) {
            return Arrays.toString((float[]) value);
        }
        if (value instanceof boolean[]) {
            return Arrays.toString((boolean[]) value);
        }
        if (value instanceof char[]) {
            return Arrays.toString((char[]) value);
        }
        if (value instanceof Object[]) {
            Object[] values = (Object[]) value;
            StringBuilder out = new StringBuilder("[");
            for (int i = 0; i < values.length; i++) {
                if (i > 0) {
                    out.append(",");
                }
                out.append(formatElement(values[i]));
            }
            return out.append("]").toString();
        }
        if (value instanceof List) {
            return formatOutput(((List<?>) value).toArray());
        }
        return String.valueOf(value);
    }

    private static String formatElement(Object value) {
        if (value instanceof String) {
            return "\"" + value + "\"";
        }
        return formatOutput(value);
    }
"#;

pub struct JavaTemplate {
    /// Sort two-element int array results before printing
    pub sort_int_pairs: bool,
}

impl JavaTemplate {
    fn scalar_type(scalar: ScalarType) -> &'static str {
        match scalar {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::String => "String",
            ScalarType::Bool => "boolean",
        }
    }

    fn declared_type(kind: InputType) -> String {
        let scalar = Self::scalar_type(kind.scalar());
        if kind.is_array() {
            format!("{}[]", scalar)
        } else {
            scalar.to_string()
        }
    }

    fn scalar_literal(scalar: ScalarType, value: &str) -> String {
        let value = value.trim();
        match scalar {
            ScalarType::Int => value.to_string(),
            ScalarType::Float => with_suffix(value, 'f'),
            ScalarType::Double => with_suffix(value, 'd'),
            ScalarType::String => quote(value),
            ScalarType::Bool => is_true(value).to_string(),
        }
    }

    fn formatter(&self) -> String {
        let mut formatter = String::from(FORMATTER_HEAD);
        if self.sort_int_pairs {
            formatter.push_str(SORT_INT_PAIRS);
        }
        formatter.push_str(FORMATTER_TAIL);
        formatter
    }
}

fn with_suffix(value: &str, suffix: char) -> String {
    if value.ends_with(suffix) || value.ends_with(suffix.to_ascii_uppercase()) {
        value.to_string()
    } else {
        format!("{}{}", value, suffix)
    }
}

impl LanguageTemplate for JavaTemplate {
    fn language(&self) -> Language {
        Language::Java
    }

    fn render_literal(&self, kind: InputType, value: &str) -> String {
        let scalar = kind.scalar();
        if kind.is_array() {
            format!(
                "new {}[]{{{}}}",
                Self::scalar_type(scalar),
                render_elements(value, |e| Self::scalar_literal(scalar, e))
            )
        } else {
            Self::scalar_literal(scalar, value)
        }
    }

    fn render_harness(&self, source: &str, function_name: &str, args: &[TestCaseInput]) -> String {
        // Class-based code sits next to Main; bare methods become members of Main.
        let class_based = source.contains("class ");
        let receiver = if source.contains("class Solution") {
            "new Solution()"
        } else {
            "new Main()"
        };
        let call = format!("{}.{}({})", receiver, function_name, argument_list(args));

        let mut program = String::from("import java.util.*;\n\n");
        if class_based {
            // Only Main may be public in Main.java
            program.push_str(&source.replace("public class ", "class "));
            program.push_str("\n\n");
        }

        program.push_str("public class Main {\n");
        if !class_based {
            program.push_str(source);
            program.push_str("\n\n");
        }

        program.push_str("    public static void main(String[] args) {\n");
        for arg in args {
            program.push_str(&format!(
                "        {} {} = {};\n",
                Self::declared_type(arg.kind),
                arg.name,
                self.render_literal(arg.kind, &arg.value)
            ));
        }

        if has_print_statement(source, PRINT_MARKERS) {
            program.push_str(&format!("        {};\n", call));
        } else {
            program.push_str(&format!("        System.out.println(formatOutput({}));\n", call));
        }
        program.push_str("    }\n\n");

        program.push_str(&self.formatter());
        program.push_str("}\n");
        program
    }
}
