//! Linter finding aggregation and recommendation lookup.

use super::{Finding, IssueGroup, IssueLocation};
use std::collections::HashMap;

/// Fallback guidance when an issue code has no table entry.
pub const GENERIC_RECOMMENDATION: &str = "General code improvement suggested.";

/// Built-in guidance for common pylint codes.
static DEFAULT_RECOMMENDATIONS: &[(&str, &str)] = &[
    (
        "C0103",
        "Invalid name. Use a consistent naming style, such as snake_case for variables and functions, and CamelCase for classes.",
    ),
    (
        "C0111",
        "Missing module/class/function docstring. Consider adding a docstring to improve code documentation.",
    ),
    (
        "C0114",
        "To improve code readability and maintainability, include a docstring at the beginning of your module. A good module docstring should provide a brief overview of the module's purpose, its functionality, and any important information that might help other developers understand and use the module. Follow the PEP 257 conventions for module docstrings.",
    ),
    (
        "C0116",
        "To improve code readability and maintainability, always include a docstring at the beginning of your functions and methods. A good docstring should describe the purpose of the function, its parameters, return values, and any exceptions it might raise. Follow the PEP 257 conventions for docstrings.",
    ),
    (
        "C0200",
        "Consider using enumerate() instead of iterating with range() and len().",
    ),
    (
        "C0301",
        "Line too long. Consider breaking the line into smaller parts.",
    ),
    (
        "C0302",
        "Too many lines in module. Consider refactoring into smaller modules.",
    ),
    ("C0303", "Consider removing unnecessary empty spaces."),
    ("C0305", "Consider removing unnecessary empty lines."),
    ("C0321", "Multiple statements on one line."),
    ("C0325", "Unnecessary parens after a keyword."),
    ("C0330", "Consider fixing indentation."),
    (
        "C0411",
        "Wrong import order. Imports should be grouped in the following order: standard library imports, related third-party imports, local application/library-specific imports.",
    ),
    ("C0412", "Imports not grouped. Separate imports by blank line."),
    (
        "C1801",
        "Do not use `len()` to check if a sequence is empty; test the sequence directly with `if`.",
    ),
    ("E0401", "Consider installing the mentioned libraries."),
    (
        "E1101",
        "Module has no member. Ensure the module or class has the expected attributes or methods.",
    ),
    ("E1121", "Too many positional arguments for function call."),
    (
        "E1133",
        "Unused variable. Remove the variable or use it in the code.",
    ),
    ("E1134", "Unnecessary statement."),
    ("E1200", "Unsupported token."),
    ("E9999", "SyntaxError: invalid syntax."),
    ("F0001", "Internal error."),
    ("F0010", "Syntax error."),
    (
        "F0202",
        "Unable to find module. Check if the module is installed and available in the correct path.",
    ),
    (
        "F0401",
        "Unable to import module. Check if the module is installed and available in the correct path.",
    ),
    ("R0201", "Method has no argument."),
    ("R0801", "Similar lines in files."),
    ("R0901", "Too many ancestors."),
    ("R0902", "Too many instance attributes."),
    (
        "R0903",
        "Too few public methods. Consider combining similar methods or ensuring the class has enough functionality.",
    ),
    (
        "R0904",
        "Too many public methods. Consider refactoring to reduce the number of methods.",
    ),
    (
        "R0911",
        "Too many return statements. Consider refactoring to reduce the complexity of the method.",
    ),
    (
        "R0912",
        "Too many branches. Consider refactoring to reduce the complexity of the method.",
    ),
    (
        "R0913",
        "Too many arguments. Consider refactoring to reduce the number of arguments.",
    ),
    (
        "R0914",
        "Too many local variables. Try to reduce the number of variables or break the function into smaller ones.",
    ),
    (
        "R0915",
        "Too many statements. Consider breaking the function into smaller, more manageable pieces.",
    ),
    (
        "R1702",
        "Too many nested blocks. Consider refactoring to reduce the nesting.",
    ),
    ("R1705", "No exception type(s) specified."),
    ("R1716", "Consider separating comparisons with parentheses."),
    ("R1722", "Consider using sys.exit()."),
    (
        "W0102",
        "Dangerous default value. Avoid using mutable default values in function/method definitions.",
    ),
    ("W0201", "Attribute defined outside __init__ method."),
    ("W0212", "Access to a protected member of a client class."),
    ("W0221", "Arguments number differs from method."),
    ("W0231", "Instance attribute defined outside __init__ method."),
    ("W0611", "Unused import. Remove the import statement."),
    (
        "W0612",
        "Unused variable. Remove the variable or use it in the code.",
    ),
    (
        "W0613",
        "Unused argument. Remove the argument or use it in the code.",
    ),
    ("W0621", "Redefining built-in."),
    (
        "W0702",
        "No exception type(s) specified in except clause. Specify the exception type(s) to catch.",
    ),
    (
        "W0703",
        "Catching \"Exception\" is too broad. Instead, catch specific exceptions to handle expected errors and avoid masking other issues. For example, use \"except ValueError:\" instead of \"except Exception:\".",
    ),
    (
        "W1514",
        "Using `open()` without explicitly specifying an encoding can lead to compatibility issues across different systems and locales. Always specify an encoding (e.g., `open(filename, mode, encoding=\"utf-8\")`) to ensure consistent behavior and to avoid potential encoding-related bugs.",
    ),
];

/// Issue-code to guidance-text mapping, passed into [`aggregate`] so the
/// table can be swapped or extended without touching aggregation.
#[derive(Clone, Debug)]
pub struct RecommendationTable {
    entries: HashMap<String, String>,
}

impl Default for RecommendationTable {
    fn default() -> Self {
        let entries = DEFAULT_RECOMMENDATIONS
            .iter()
            .map(|(code, text)| (code.to_string(), text.to_string()))
            .collect();
        Self { entries }
    }
}

impl RecommendationTable {
    /// Table with no entries; every lookup falls back to the generic text.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds or replaces entries, e.g. from the `[recommendations]` config
    /// section.
    pub fn extend<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.entries.extend(overrides);
    }

    /// Guidance for `code`; absent codes yield [`GENERIC_RECOMMENDATION`],
    /// never an error.
    pub fn text_for(&self, code: &str) -> &str {
        self.entries
            .get(code)
            .map(String::as_str)
            .unwrap_or(GENERIC_RECOMMENDATION)
    }
}

/// Folds findings into [`IssueGroup`]s keyed by code.
///
/// The first finding seen for a code fixes the group's representative
/// message and its place in the output order. A finding without a usable
/// line number still creates or joins its group but contributes no
/// location.
pub fn aggregate(findings: &[Finding], table: &RecommendationTable) -> Vec<IssueGroup> {
    let mut groups: Vec<IssueGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for finding in findings {
        let slot = match index.get(&finding.code) {
            Some(&existing) => existing,
            None => {
                index.insert(finding.code.clone(), groups.len());
                groups.push(IssueGroup {
                    code: finding.code.clone(),
                    message: finding.message.clone(),
                    recommendation: table.text_for(&finding.code).to_string(),
                    locations: Vec::new(),
                });
                groups.len() - 1
            }
        };

        if let Some(line) = finding.line {
            groups[slot].locations.push(IssueLocation {
                path: finding.path.clone(),
                line,
                snippet: None,
            });
        }
    }

    groups
}

/// Fills in the trimmed source line for each location out of `content`
/// (the working-tree text of the file the findings point at). Lines past
/// EOF leave the snippet unset.
pub fn attach_snippets(groups: &mut [IssueGroup], content: &str) {
    let lines: Vec<&str> = content.lines().collect();

    for group in groups.iter_mut() {
        for location in group.locations.iter_mut() {
            let index = location.line as usize;
            if index >= 1 && index <= lines.len() {
                location.snippet = Some(lines[index - 1].trim().to_string());
            }
        }
    }
}
