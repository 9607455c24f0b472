// ava-core/src/domain/rules/checkers/filename.rs

use super::{RuleChecker, compile_rule_pattern};
use crate::domain::rules::{Rule, RuleViolation};
use crate::domain::workspace::FileNode;

/// Tests `file.name` against the rule's regex `pattern`.
pub struct FilenameChecker;

impl RuleChecker for FilenameChecker {
    fn check(&self, file: &FileNode, rule: &Rule) -> Option<RuleViolation> {
        let pattern = rule.config.pattern.as_deref()?;
        let regex = compile_rule_pattern(pattern, rule, "filename pattern")?;

        if regex.is_match(&file.name) {
            return None;
        }

        Some(RuleViolation::new(
            rule,
            file,
            format!("Filename \"{}\" doesn't match required pattern.", file.name),
            Some(suggest_filename_fix(&file.name, pattern)),
        ))
    }
}

/// Heuristic fix suggestion. It only looks for the literal words
/// `kebab-case`, `snake_case` or `camelCase` inside the pattern text and is
/// not a general case converter.
pub fn suggest_filename_fix(filename: &str, pattern: &str) -> String {
    if pattern.contains("kebab-case") {
        return collapse_runs(&filename.to_lowercase(), |c| c == '_' || c.is_whitespace(), "-");
    }
    if pattern.contains("snake_case") {
        return collapse_runs(&filename.to_lowercase(), |c| c == '-' || c.is_whitespace(), "_");
    }
    if pattern.contains("camelCase") {
        return camelize(filename);
    }
    format!("Ensure filename matches pattern: {}", pattern)
}

fn collapse_runs(input: &str, is_sep: impl Fn(char) -> bool, replacement: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for c in input.chars() {
        if is_sep(c) {
            if !in_run {
                out.push_str(replacement);
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

fn camelize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = false;
    for c in input.chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
