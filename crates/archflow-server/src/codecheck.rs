//! Structural checks for user-supplied renderer source.
//!
//! The sandbox is the real security boundary; these checks exist to give
//! fast, actionable feedback before a subprocess is spawned, and to refuse
//! source that obviously is not a diagram program.

use archflow_symbols::tables;

/// Maximum accepted source size.
pub const MAX_CODE_BYTES: usize = 100 * 1024;

/// Result of a structural check pass.
#[derive(Debug, Clone, Default)]
pub struct CodeReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl CodeReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Statement fragments that have no business in a diagram script.
static FORBIDDEN: &[(&str, &str)] = &[
    ("import os", "operating system access"),
    ("import sys", "interpreter access"),
    ("import subprocess", "spawning processes"),
    ("import socket", "network access"),
    ("import shutil", "filesystem manipulation"),
    ("__import__", "dynamic imports"),
    ("eval(", "dynamic evaluation"),
    ("exec(", "dynamic evaluation"),
    ("open(", "raw file access"),
];

/// Run the structural checks.
#[must_use]
pub fn check(code: &str) -> CodeReport {
    let mut report = CodeReport::default();

    if code.trim().is_empty() {
        report.errors.push("code is empty".to_string());
        return report;
    }
    if code.len() > MAX_CODE_BYTES {
        report
            .errors
            .push(format!("code exceeds {MAX_CODE_BYTES} bytes"));
        return report;
    }

    for (needle, why) in FORBIDDEN {
        if code.contains(needle) {
            report
                .errors
                .push(format!("forbidden construct {needle:?} ({why})"));
        }
    }

    check_balance(code, &mut report);

    if !code.contains("Diagram(") {
        report
            .errors
            .push("no Diagram(...) context found".to_string());
    } else if !code.contains("with Diagram") {
        report
            .warnings
            .push("Diagram should be used as a context manager (with Diagram(...))".to_string());
    }

    check_imports(code, &mut report);

    if code.contains("Diagram(") && !code.contains("show=False") {
        report
            .suggestions
            .push("pass show=False to Diagram to avoid opening a viewer".to_string());
    }
    if code.contains("Diagram(") && !code.contains("outformat") {
        report
            .suggestions
            .push("pass outformat=... to control the artifact format".to_string());
    }

    report
}

/// Balanced-bracket scan, string-aware.
fn check_balance(code: &str, report: &mut CodeReport) {
    let mut stack = Vec::new();
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    for c in code.chars() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_string = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => in_string = Some(c),
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    report.errors.push(format!("unbalanced {c:?}"));
                    return;
                }
            }
            _ => {}
        }
    }
    if let Some(open) = stack.last() {
        report.errors.push(format!("unclosed {open:?}"));
    }
}

/// Imports must target the diagrams package; unknown diagram modules get a
/// warning (the sandbox will fail them anyway, but with a worse message).
fn check_imports(code: &str, report: &mut CodeReport) {
    for line in code.lines() {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix("from ") else {
            continue;
        };
        let Some((module, _)) = rest.split_once(" import ") else {
            continue;
        };
        let module = module.trim();
        if module == "diagrams" {
            continue;
        }
        if !module.starts_with("diagrams.") {
            report
                .errors
                .push(format!("import outside the diagrams package: {module:?}"));
            continue;
        }
        if tables::module_entry(module).is_none() {
            report
                .warnings
                .push(format!("unknown diagrams module {module:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"from diagrams import Diagram
from diagrams.aws.compute import Lambda

with Diagram("Demo", show=False, outformat="png"):
    fn = Lambda("Handler")
"#;

    #[test]
    fn test_good_code_is_valid() {
        let report = check(GOOD);
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_empty_code_rejected() {
        assert!(!check("   ").is_valid());
    }

    #[test]
    fn test_oversized_code_rejected() {
        let big = "x".repeat(MAX_CODE_BYTES + 1);
        assert!(!check(&big).is_valid());
    }

    #[test]
    fn test_forbidden_imports_rejected() {
        for bad in ["import os", "import subprocess", "__import__('os')", "eval(x)"] {
            let code = format!("{bad}\nwith Diagram(\"d\", show=False):\n    pass\n");
            let report = check(&code);
            assert!(!report.is_valid(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_unbalanced_brackets_detected() {
        let report = check("with Diagram(\"d\":\n    pass\n");
        assert!(report.errors.iter().any(|e| e.contains("unclosed")));
    }

    #[test]
    fn test_brackets_in_strings_ignored() {
        let code = "from diagrams import Diagram\nwith Diagram(\"a ( weird ] title\", show=False, outformat=\"png\"):\n    pass\n";
        assert!(check(code).is_valid());
    }

    #[test]
    fn test_missing_diagram_context_rejected() {
        let report = check("from diagrams import Diagram\nx = 1\n");
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("no Diagram(...) context")));
    }

    #[test]
    fn test_non_diagrams_import_rejected() {
        let code = "from requests import get\nwith Diagram(\"d\", show=False):\n    pass\n";
        let report = check(code);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("outside the diagrams package")));
    }

    #[test]
    fn test_unknown_diagrams_module_warns() {
        let code = "from diagrams.aws.quantum import FluxCapacitor\nwith Diagram(\"d\", show=False, outformat=\"png\"):\n    pass\n";
        let report = check(code);
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.contains("quantum")));
    }

    #[test]
    fn test_suggestions_for_missing_kwargs() {
        let code = "from diagrams import Diagram\nwith Diagram(\"d\"):\n    pass\n";
        let report = check(code);
        assert!(report.suggestions.iter().any(|s| s.contains("show=False")));
        assert!(report.suggestions.iter().any(|s| s.contains("outformat")));
    }
}
