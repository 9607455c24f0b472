// ava-core/src/domain/rules/checkers/extension.rs

use super::RuleChecker;
use crate::domain::rules::{Rule, RuleViolation};
use crate::domain::workspace::FileNode;
use crate::domain::workspace::file_node::normalize_extension;

/// Forbidden list first, then allowed list. Files without an extension never violate.
pub struct ExtensionChecker;

impl RuleChecker for ExtensionChecker {
    fn check(&self, file: &FileNode, rule: &Rule) -> Option<RuleViolation> {
        let extension = file.normalized_extension()?;
        let allowed = &rule.config.allowed_extensions;
        let forbidden = &rule.config.forbidden_extensions;

        if contains_extension(forbidden, &extension) {
            let fix = if allowed.is_empty() {
                "Remove or convert this file.".to_string()
            } else {
                format!("Use one of the allowed extensions: {}", allowed.join(", "))
            };
            return Some(RuleViolation::new(
                rule,
                file,
                format!("File extension \".{}\" is not allowed.", extension),
                Some(fix),
            ));
        }

        if !allowed.is_empty() && !contains_extension(allowed, &extension) {
            return Some(RuleViolation::new(
                rule,
                file,
                format!("File extension \".{}\" is not in allowed list.", extension),
                Some(format!(
                    "Use one of the allowed extensions: {}",
                    allowed.join(", ")
                )),
            ));
        }

        None
    }
}

fn contains_extension(list: &[String], extension: &str) -> bool {
    list.iter().any(|e| normalize_extension(e) == extension)
}
