// ava-core/src/domain/rules/checkers/filesize.rs

use super::RuleChecker;
use crate::domain::rules::{Rule, RuleViolation};
use crate::domain::workspace::FileNode;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Flags files strictly larger than `maxSizeMB`.
pub struct FilesizeChecker;

impl RuleChecker for FilesizeChecker {
    fn check(&self, file: &FileNode, rule: &Rule) -> Option<RuleViolation> {
        let max_size_mb = rule.config.max_size_mb.filter(|m| m.is_finite() && *m != 0.0)?;
        let size = file.metadata.size.filter(|s| *s != 0)?;

        let size_mb = size as f64 / BYTES_PER_MB;
        // Exactly at the limit is fine.
        if size_mb <= max_size_mb {
            return None;
        }

        Some(RuleViolation::new(
            rule,
            file,
            format!(
                "File size {:.2}MB exceeds limit of {}MB.",
                size_mb,
                format_limit(max_size_mb)
            ),
            Some("Consider compressing the file or splitting it into smaller parts.".to_string()),
        ))
    }
}

/// `10` rather than `10.0`, `2.5` stays `2.5`.
fn format_limit(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
