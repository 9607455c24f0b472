// ava-core/src/domain/rules/validator.rs

use serde::{Deserialize, Serialize};

use crate::domain::rules::checkers::compile_pattern;
use crate::domain::rules::rule::{Rule, RuleConfig, RuleDraft, RuleType};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RuleValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Static checks run before a rule is stored or activated.
/// Every applicable error is collected so an editor can show the whole list.
pub struct RuleValidator;

impl RuleValidator {
    pub fn validate_rule(draft: &RuleDraft) -> RuleValidation {
        let mut errors = Vec::new();

        if draft.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            errors.push("Rule name is required".to_string());
        }
        if draft.rule_type.is_none() {
            errors.push("Rule type is required".to_string());
        }
        if draft.severity.is_none() {
            errors.push("Rule severity is required".to_string());
        }

        if let (Some(rule_type), Some(config)) = (draft.rule_type, draft.config.as_ref()) {
            errors.extend(Self::validate_config(rule_type, config));
        }

        RuleValidation {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn validate(rule: &Rule) -> RuleValidation {
        Self::validate_rule(&RuleDraft::from(rule))
    }

    pub fn validate_config(rule_type: RuleType, config: &RuleConfig) -> Vec<String> {
        let mut errors = Vec::new();

        match rule_type {
            RuleType::Filename => match config.pattern.as_deref() {
                None | Some("") => errors.push("Filename rule requires a pattern".to_string()),
                Some(pattern) => {
                    if compile_pattern(pattern).is_err() {
                        errors.push("Invalid regex pattern".to_string());
                    }
                }
            },
            RuleType::Filesize => {
                if !config.max_size_mb.is_some_and(|m| m > 0.0) {
                    errors.push("Filesize rule requires a positive maxSizeMB value".to_string());
                }
            }
            RuleType::Extension => {
                if config.allowed_extensions.is_empty() && config.forbidden_extensions.is_empty() {
                    errors.push(
                        "Extension rule requires either allowedExtensions or forbiddenExtensions"
                            .to_string(),
                    );
                }
            }
            RuleType::Metadata => {
                if config.required_fields.is_empty() && config.field_validation.is_none() {
                    errors.push(
                        "Metadata rule requires either requiredFields or fieldValidation"
                            .to_string(),
                    );
                }
            }
            RuleType::Path => {
                if config.path_pattern.as_deref().is_none_or(str::is_empty)
                    && config.allowed_paths.is_empty()
                    && config.forbidden_paths.is_empty()
                {
                    errors.push(
                        "Path rule requires pathPattern, allowedPaths, or forbiddenPaths"
                            .to_string(),
                    );
                }
            }
            RuleType::Content => match config.content_pattern.as_deref() {
                None | Some("") => {
                    errors.push("Content rule requires a contentPattern".to_string())
                }
                Some(pattern) => {
                    if compile_pattern(pattern).is_err() {
                        errors.push("Invalid content pattern".to_string());
                    }
                }
            },
            RuleType::Custom => {}
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::{FieldValidation, RuleSeverity};

    fn draft(rule_type: RuleType, config: RuleConfig) -> RuleDraft {
        RuleDraft {
            name: Some("rule".into()),
            rule_type: Some(rule_type),
            severity: Some(RuleSeverity::Error),
            config: Some(config),
            ..RuleDraft::default()
        }
    }

    #[test]
    fn test_missing_header_fields_are_all_reported() {
        let result = RuleValidator::validate_rule(&RuleDraft {
            name: Some("   ".into()),
            ..RuleDraft::default()
        });
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "Rule name is required",
                "Rule type is required",
                "Rule severity is required"
            ]
        );
    }

    #[test]
    fn test_filename_pattern_must_compile() {
        let bad = draft(
            RuleType::Filename,
            RuleConfig {
                pattern: Some("[a-".into()),
                ..RuleConfig::default()
            },
        );
        assert_eq!(RuleValidator::validate_rule(&bad).errors, vec!["Invalid regex pattern"]);

        let missing = draft(RuleType::Filename, RuleConfig::default());
        assert_eq!(
            RuleValidator::validate_rule(&missing).errors,
            vec!["Filename rule requires a pattern"]
        );
    }

    #[test]
    fn test_filesize_requires_positive_limit() {
        for max in [None, Some(0.0), Some(-1.0)] {
            let d = draft(
                RuleType::Filesize,
                RuleConfig {
                    max_size_mb: max,
                    ..RuleConfig::default()
                },
            );
            assert!(!RuleValidator::validate_rule(&d).valid, "{:?} should be rejected", max);
        }
        let ok = draft(
            RuleType::Filesize,
            RuleConfig {
                max_size_mb: Some(0.5),
                ..RuleConfig::default()
            },
        );
        assert!(RuleValidator::validate_rule(&ok).valid);
    }

    #[test]
    fn test_per_type_requirements() {
        assert!(!RuleValidator::validate_rule(&draft(RuleType::Extension, RuleConfig::default())).valid);
        assert!(!RuleValidator::validate_rule(&draft(RuleType::Metadata, RuleConfig::default())).valid);
        assert!(!RuleValidator::validate_rule(&draft(RuleType::Path, RuleConfig::default())).valid);
        assert!(!RuleValidator::validate_rule(&draft(RuleType::Content, RuleConfig::default())).valid);
        assert!(RuleValidator::validate_rule(&draft(RuleType::Custom, RuleConfig::default())).valid);

        let metadata = draft(
            RuleType::Metadata,
            RuleConfig {
                field_validation: Some(FieldValidation::new()),
                ..RuleConfig::default()
            },
        );
        assert!(RuleValidator::validate_rule(&metadata).valid);
    }

    #[test]
    fn test_unrelated_config_fields_are_ignored() {
        let d = draft(
            RuleType::Path,
            RuleConfig {
                forbidden_paths: vec!["/tmp".into()],
                pattern: Some("[broken".into()),
                max_size_mb: Some(-3.0),
                ..RuleConfig::default()
            },
        );
        assert!(RuleValidator::validate_rule(&d).valid);
    }

    #[test]
    fn test_header_and_config_errors_accumulate() {
        let d = RuleDraft {
            rule_type: Some(RuleType::Extension),
            config: Some(RuleConfig::default()),
            ..RuleDraft::default()
        };
        assert_eq!(RuleValidator::validate_rule(&d).errors.len(), 3);
    }
}
