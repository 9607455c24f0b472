// ava-core/src/domain/rules/checkers/path.rs

use super::{RuleChecker, compile_rule_pattern};
use crate::domain::rules::{Rule, RuleViolation};
use crate::domain::workspace::FileNode;

/// Forbidden locations, then allowed locations, then a full-path regex.
/// Location entries are substrings of the path; there is no glob support.
pub struct PathChecker;

impl RuleChecker for PathChecker {
    fn check(&self, file: &FileNode, rule: &Rule) -> Option<RuleViolation> {
        let config = &rule.config;
        let path = file.path.as_str();

        if config
            .forbidden_paths
            .iter()
            .any(|p| path.contains(p.as_str()))
        {
            let fix = if config.allowed_paths.is_empty() {
                "Move file to a different location.".to_string()
            } else {
                format!("Move to one of: {}", config.allowed_paths.join(", "))
            };
            return Some(RuleViolation::new(
                rule,
                file,
                "File is in a forbidden location.",
                Some(fix),
            ));
        }

        if !config.allowed_paths.is_empty()
            && !config
                .allowed_paths
                .iter()
                .any(|p| path.starts_with(p.as_str()) || path.contains(p.as_str()))
        {
            return Some(RuleViolation::new(
                rule,
                file,
                "File must be in one of the allowed paths.",
                Some(format!("Move to one of: {}", config.allowed_paths.join(", "))),
            ));
        }

        if let Some(pattern) = config.path_pattern.as_deref() {
            let regex = compile_rule_pattern(pattern, rule, "path pattern")?;
            if !regex.is_match(path) {
                return Some(RuleViolation::new(
                    rule,
                    file,
                    "File path doesn't match required pattern.",
                    Some(format!("Ensure path matches pattern: {}", pattern)),
                ));
            }
        }

        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::rules::test_support::rule_with;
    use crate::domain::rules::{RuleConfig, RuleType};

    fn path_rule(pattern: Option<&str>, allowed: &[&str], forbidden: &[&str]) -> Rule {
        rule_with(
            RuleType::Path,
            RuleConfig {
                path_pattern: pattern.map(str::to_string),
                allowed_paths: allowed.iter().map(|s| s.to_string()).collect(),
                forbidden_paths: forbidden.iter().map(|s| s.to_string()).collect(),
                ..RuleConfig::default()
            },
        )
    }

    #[test]
    fn test_forbidden_beats_allowed() {
        let rule = path_rule(None, &["/src"], &["/tmp"]);
        let violation = PathChecker
            .check(&FileNode::file("f", "/src/tmp/cache.ts"), &rule)
            .unwrap();
        assert!(violation.message.starts_with("File is in a forbidden location."));
        assert_eq!(
            violation.context.suggested_fix.as_deref(),
            Some("Move to one of: /src")
        );
    }

    #[test]
    fn test_allowed_paths_use_substring_match() {
        let rule = path_rule(None, &["/components"], &[]);
        assert!(PathChecker
            .check(&FileNode::file("f", "/app/components/button.tsx"), &rule)
            .is_none());
        assert!(PathChecker
            .check(&FileNode::file("f", "/app/pages/index.tsx"), &rule)
            .is_some());
    }

    #[test]
    fn test_path_pattern_checked_last() {
        let rule = path_rule(Some(r"^/src/.+\.rs$"), &[], &[]);
        assert!(PathChecker
            .check(&FileNode::file("f", "/src/lib.rs"), &rule)
            .is_none());
        let violation = PathChecker
            .check(&FileNode::file("f", "/lib.rs"), &rule)
            .unwrap();
        assert!(violation.message.contains("doesn't match required pattern"));
    }

    #[test]
    fn test_invalid_path_pattern_fails_open() {
        let rule = path_rule(Some("(?P<"), &[], &[]);
        assert!(PathChecker
            .check(&FileNode::file("f", "/anything"), &rule)
            .is_none());
    }
}
