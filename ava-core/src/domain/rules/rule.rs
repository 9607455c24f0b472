// ava-core/src/domain/rules/rule.rs

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::rules::validator::RuleValidator;

/// A declarative compliance constraint applied to the files in its scope.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub severity: RuleSeverity,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub config: RuleConfig,
    #[serde(default)]
    pub scope: RuleScope,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Filename,
    Filesize,
    Extension,
    Metadata,
    Content,
    Path,
    Custom,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filename => "filename",
            Self::Filesize => "filesize",
            Self::Extension => "extension",
            Self::Metadata => "metadata",
            Self::Content => "content",
            Self::Path => "path",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Error,
    Warning,
    Info,
}

impl RuleSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Union of every rule type's configuration. Only the fields relevant to the
/// rule's type are read; the others are carried along untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    // filename
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    // filesize
    #[serde(rename = "maxSizeMB", default, skip_serializing_if = "Option::is_none")]
    pub max_size_mb: Option<f64>,

    // extension
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_extensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forbidden_extensions: Vec<String>,

    // metadata
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_validation: Option<FieldValidation>,

    // content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<MatchMode>,

    // path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forbidden_paths: Vec<String>,

    // custom
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_config: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    #[default]
    MustMatch,
    MustNotMatch,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidator {
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Boolean,
    Date,
    Enum,
}

/// Per-field validators keyed by field name, in declaration order.
/// Evaluation order matters (first failing field wins), so a hash map won't do.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldValidation(Vec<(String, FieldValidator)>);

impl FieldValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, validator: FieldValidator) -> Self {
        self.insert(field, validator);
        self
    }

    /// Inserts or replaces, keeping the original position of a replaced field.
    pub fn insert(&mut self, field: impl Into<String>, validator: FieldValidator) {
        let field = field.into();
        match self.0.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = validator,
            None => self.0.push((field, validator)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValidator)> {
        self.0.iter().map(|(name, v)| (name.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FieldValidation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, validator) in &self.0 {
            map.serialize_entry(name, validator)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldValidation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = FieldValidation;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field name to validator")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = FieldValidation::new();
                while let Some((name, validator)) =
                    access.next_entry::<String, FieldValidator>()?
                {
                    fields.insert(name, validator);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Which files a rule applies to. Path entries are plain substrings, not globs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuleScope {
    #[serde(default)]
    pub apply_to_all: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl RuleScope {
    pub fn all() -> Self {
        Self {
            apply_to_all: true,
            ..Self::default()
        }
    }
}

/// A rule as submitted by an editor: every top-level field may be missing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<RuleSeverity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<RuleConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<RuleScope>,
}

impl RuleDraft {
    /// Validates the draft and promotes it to a complete rule.
    /// A missing id is minted the same way violation ids are.
    pub fn into_rule(self) -> Result<Rule, DomainError> {
        let validation = RuleValidator::validate_rule(&self);
        let label = self
            .id
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| "<unnamed>".to_string());

        match (self.name, self.rule_type, self.severity) {
            (Some(name), Some(rule_type), Some(severity)) if validation.valid => Ok(Rule {
                id: self.id.unwrap_or_else(generate_rule_id),
                name,
                description: self.description.unwrap_or_default(),
                rule_type,
                severity,
                enabled: self.enabled.unwrap_or(true),
                config: self.config.unwrap_or_default(),
                scope: self.scope.unwrap_or_default(),
            }),
            _ => Err(DomainError::InvalidRule {
                rule_id: label,
                errors: validation.errors,
            }),
        }
    }
}

impl From<&Rule> for RuleDraft {
    fn from(rule: &Rule) -> Self {
        Self {
            id: Some(rule.id.clone()),
            name: Some(rule.name.clone()),
            description: Some(rule.description.clone()),
            rule_type: Some(rule.rule_type),
            severity: Some(rule.severity),
            enabled: Some(rule.enabled),
            config: Some(rule.config.clone()),
            scope: Some(rule.scope.clone()),
        }
    }
}

pub fn generate_rule_id() -> String {
    format!("rule_{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_rule_deserialization_from_yaml() -> Result<()> {
        let yaml = r#"
id: max-size
name: Max size
type: filesize
severity: warning
config:
  maxSizeMB: 2.5
  pattern: ignored-for-filesize
"#;
        let rule: Rule = serde_yaml::from_str(yaml)?;
        assert_eq!(rule.rule_type, RuleType::Filesize);
        assert_eq!(rule.severity, RuleSeverity::Warning);
        assert!(rule.enabled);
        assert_eq!(rule.config.max_size_mb, Some(2.5));
        assert!(!rule.scope.apply_to_all);
        Ok(())
    }

    #[test]
    fn test_field_validation_keeps_declaration_order() -> Result<()> {
        let yaml = r#"
zeta: { type: string, required: true }
alpha: { type: enum, enumValues: [a, b] }
mid: { type: string, pattern: "^x" }
"#;
        let fields: FieldValidation = serde_yaml::from_str(yaml)?;
        let names: Vec<&str> = fields.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);

        let back = serde_yaml::to_string(&fields)?;
        assert!(back.find("zeta").unwrap() < back.find("alpha").unwrap());
        Ok(())
    }

    #[test]
    fn test_draft_into_rule_mints_id() -> Result<()> {
        let draft = RuleDraft {
            name: Some("No temp".into()),
            rule_type: Some(RuleType::Path),
            severity: Some(RuleSeverity::Info),
            config: Some(RuleConfig {
                forbidden_paths: vec!["/tmp".into()],
                ..RuleConfig::default()
            }),
            ..RuleDraft::default()
        };
        let rule = draft.into_rule()?;
        assert!(rule.id.starts_with("rule_"));
        assert!(rule.enabled);
        Ok(())
    }

    #[test]
    fn test_invalid_draft_is_rejected_with_all_errors() {
        let draft = RuleDraft {
            id: Some("broken".into()),
            rule_type: Some(RuleType::Filesize),
            config: Some(RuleConfig::default()),
            ..RuleDraft::default()
        };
        match draft.into_rule() {
            Err(DomainError::InvalidRule { rule_id, errors }) => {
                assert_eq!(rule_id, "broken");
                assert_eq!(errors.len(), 3);
            }
            other => panic!("expected InvalidRule, got {:?}", other),
        }
    }
}
