// ava-core/src/domain/rules/checkers/metadata.rs

use super::{RuleChecker, compile_rule_pattern};
use crate::domain::rules::{Rule, RuleViolation};
use crate::domain::workspace::FileNode;

/// Required custom fields, then per-field validators in declaration order.
pub struct MetadataChecker;

impl RuleChecker for MetadataChecker {
    fn check(&self, file: &FileNode, rule: &Rule) -> Option<RuleViolation> {
        let config = &rule.config;

        let missing: Vec<&str> = config
            .required_fields
            .iter()
            .map(String::as_str)
            .filter(|field| !file.has_field(field))
            .collect();

        if !missing.is_empty() {
            let list = missing.join(", ");
            return Some(RuleViolation::new(
                rule,
                file,
                format!("Missing required metadata fields: {}.", list),
                Some(format!("Add the following metadata fields: {}", list)),
            ));
        }

        let validators = config.field_validation.as_ref()?;

        for (field, validator) in validators.iter() {
            let value = file.field_text(field);

            let Some(value) = value else {
                if validator.required {
                    return Some(RuleViolation::new(
                        rule,
                        file,
                        format!("Required metadata field \"{}\" is missing.", field),
                        Some(format!("Add metadata field: {}", field)),
                    ));
                }
                continue;
            };

            if let Some(pattern) = validator.pattern.as_deref() {
                let matched = compile_rule_pattern(pattern, rule, "field pattern")
                    .map(|regex| regex.is_match(&value));
                if matched == Some(false) {
                    return Some(RuleViolation::new(
                        rule,
                        file,
                        format!("Metadata field \"{}\" doesn't match pattern.", field),
                        Some(format!("Ensure {} matches pattern: {}", field, pattern)),
                    ));
                }
            }

            if let Some(allowed) = validator.enum_values.as_ref() {
                if !allowed.iter().any(|v| *v == value) {
                    let list = allowed.join(", ");
                    return Some(RuleViolation::new(
                        rule,
                        file,
                        format!("Metadata field \"{}\" must be one of: {}.", field, list),
                        Some(format!("Use one of: {}", list)),
                    ));
                }
            }
        }

        None
    }
}
