// ava-core/src/domain/rules/checkers/mod.rs

pub mod content;
pub mod extension;
pub mod filename;
pub mod filesize;
pub mod metadata;
pub mod path;

pub use content::ContentChecker;
pub use extension::ExtensionChecker;
pub use filename::FilenameChecker;
pub use filesize::FilesizeChecker;
pub use metadata::MetadataChecker;
pub use path::PathChecker;

use regex::Regex;

use crate::domain::error::DomainError;
use crate::domain::rules::{Rule, RuleViolation};
use crate::domain::workspace::FileNode;

/// Evaluates one rule against one file.
///
/// Implementations are pure: no I/O, no shared state, and at most one
/// violation per (file, rule) pair. Evaluation stops at the first failing
/// condition.
pub trait RuleChecker: Send + Sync {
    fn check(&self, file: &FileNode, rule: &Rule) -> Option<RuleViolation>;
}

impl<F> RuleChecker for F
where
    F: Fn(&FileNode, &Rule) -> Option<RuleViolation> + Send + Sync,
{
    fn check(&self, file: &FileNode, rule: &Rule) -> Option<RuleViolation> {
        self(file, rule)
    }
}

pub fn compile_pattern(pattern: &str) -> Result<Regex, DomainError> {
    Regex::new(pattern).map_err(|e| DomainError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Compiles a pattern coming from rule configuration.
/// A malformed pattern is logged and yields `None`: one broken rule must not
/// abort the whole pass.
pub(crate) fn compile_rule_pattern(pattern: &str, rule: &Rule, what: &str) -> Option<Regex> {
    match compile_pattern(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::error!(
                rule_id = %rule.id,
                pattern = %pattern,
                error = %e,
                "Invalid {} in rule, skipping check",
                what
            );
            None
        }
    }
}
