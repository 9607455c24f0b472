// ava-core/src/domain/rules/violation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::rules::rule::{Rule, RuleSeverity};
use crate::domain::workspace::FileNode;

/// A single breach of one rule by one file. Minted fresh on every detection:
/// two runs over the same input produce different ids.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleViolation {
    pub id: String,
    pub rule_id: String,
    pub file_node_id: String,
    pub severity: RuleSeverity,
    pub message: String,
    pub context: ViolationContext,
    pub detected_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViolationContext {
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
}

impl RuleViolation {
    /// Builds a violation of `rule` by `file`. The rule description is appended
    /// to `message`, and the severity is taken from the rule as-is.
    pub fn new(
        rule: &Rule,
        file: &FileNode,
        message: impl AsRef<str>,
        suggested_fix: Option<String>,
    ) -> Self {
        let message = if rule.description.trim().is_empty() {
            message.as_ref().to_string()
        } else {
            format!("{} {}", message.as_ref(), rule.description)
        };

        Self {
            id: generate_violation_id(),
            rule_id: rule.id.clone(),
            file_node_id: file.id.clone(),
            severity: rule.severity,
            message,
            context: ViolationContext {
                file_path: file.path.clone(),
                suggested_fix,
            },
            detected_at: Utc::now(),
        }
    }
}

pub fn generate_violation_id() -> String {
    format!("violation_{}", uuid::Uuid::new_v4().simple())
}

/// Outcome of checking a file collection against a rule set.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RuleCheckResult {
    pub passed: bool,
    pub violations: Vec<RuleViolation>,
    pub checked_at: DateTime<Utc>,
    pub total_checked: usize,
    pub total_violations: usize,
}

impl RuleCheckResult {
    pub fn new(violations: Vec<RuleViolation>, total_checked: usize) -> Self {
        Self {
            passed: violations.is_empty(),
            total_violations: violations.len(),
            violations,
            checked_at: Utc::now(),
            total_checked,
        }
    }

    pub fn count_by_severity(&self, severity: RuleSeverity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count_by_severity(RuleSeverity::Error) > 0
    }
}
