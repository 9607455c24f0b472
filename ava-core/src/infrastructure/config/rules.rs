// ava-core/src/infrastructure/config/rules.rs

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::domain::rules::{Rule, RuleDraft, find_template};
use crate::error::AvaError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::RuleSource;

/// Rule files are either `rules: [...]` or a bare list.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleFile {
    Wrapped { rules: Vec<RuleDraft> },
    Bare(Vec<RuleDraft>),
}

impl RuleFile {
    fn into_drafts(self) -> Vec<RuleDraft> {
        match self {
            Self::Wrapped { rules } | Self::Bare(rules) => rules,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Raw drafts, without validation. Used by `ava rules validate`.
pub fn read_rule_drafts(path: &Path) -> Result<Vec<RuleDraft>, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    let file: RuleFile = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(file.into_drafts())
}

/// Loads and validates a rule set. The first invalid rule fails the load.
#[instrument]
pub fn load_rule_set(path: &Path) -> Result<Vec<Rule>, AvaError> {
    let drafts = read_rule_drafts(path)?;
    let mut rules = Vec::with_capacity(drafts.len());
    for draft in drafts {
        rules.push(draft.into_rule()?);
    }
    check_unique_ids(&rules)?;
    info!(count = rules.len(), path = ?path, "Rule set loaded");
    Ok(rules)
}

fn check_unique_ids(rules: &[Rule]) -> Result<(), InfrastructureError> {
    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(rule.id.as_str()) {
            return Err(InfrastructureError::ConfigError(format!(
                "Duplicate rule id '{}'",
                rule.id
            )));
        }
    }
    Ok(())
}

/// Rules from an optional file plus enabled built-in templates.
#[derive(Debug, Clone, Default)]
pub struct RuleSetSource {
    pub path: Option<PathBuf>,
    pub templates: Vec<String>,
}

impl RuleSetSource {
    pub fn new(path: Option<PathBuf>, templates: Vec<String>) -> Self {
        Self { path, templates }
    }
}

impl RuleSource for RuleSetSource {
    fn load_rules(&self) -> Result<Vec<Rule>, AvaError> {
        let mut rules = match &self.path {
            Some(path) => load_rule_set(path)?,
            None => Vec::new(),
        };

        for id in &self.templates {
            if rules.iter().any(|r| &r.id == id) {
                warn!(template = %id, "Rule file already defines this id, template skipped");
                continue;
            }
            rules.push(find_template(id)?.to_rule());
            debug!(template = %id, "Template enabled");
        }

        if rules.is_empty() {
            warn!("No rules configured: nothing will be checked");
        }
        Ok(rules)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::rules::{RuleSeverity, RuleType};
    use anyhow::Result;
    use tempfile::tempdir;

    const RULES_YAML: &str = r#"
rules:
  - id: kebab
    name: Kebab files
    type: filename
    severity: warning
    config:
      pattern: "^[a-z0-9-]+\\.[a-z]+$"
  - name: Small files
    type: filesize
    severity: error
    config:
      maxSizeMB: 5
    scope:
      applyToAll: false
      fileTypes: [png, jpg]
"#;

    #[test]
    fn test_load_wrapped_yaml() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("rules.yaml");
        fs::write(&path, RULES_YAML)?;

        let rules = load_rule_set(&path)?;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, "kebab");
        assert_eq!(rules[0].severity, RuleSeverity::Warning);
        assert!(rules[0].enabled);
        assert_eq!(rules[1].rule_type, RuleType::Filesize);
        assert_eq!(rules[1].config.max_size_mb, Some(5.0));
        assert!(rules[1].id.starts_with("rule_"));
        assert_eq!(rules[1].scope.file_types, vec!["png", "jpg"]);
        Ok(())
    }

    #[test]
    fn test_load_bare_json_list() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("rules.json");
        fs::write(
            &path,
            r#"[{"id": "no-exe", "name": "No exe", "type": "extension", "severity": "error",
                "config": {"forbiddenExtensions": [".exe"]}}]"#,
        )?;
        let rules = load_rule_set(&path)?;
        assert_eq!(rules[0].config.forbidden_extensions, vec![".exe"]);
        Ok(())
    }

    #[test]
    fn test_invalid_rule_fails_load() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("rules.yml");
        fs::write(
            &path,
            "- id: broken\n  name: Broken\n  type: filename\n  severity: error\n  config:\n    pattern: \"[unclosed\"\n",
        )?;
        match load_rule_set(&path) {
            Err(AvaError::Domain(DomainError::InvalidRule { rule_id, errors })) => {
                assert_eq!(rule_id, "broken");
                assert_eq!(errors, vec!["Invalid regex pattern"]);
            }
            other => panic!("expected InvalidRule, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_duplicate_ids_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("rules.yml");
        let rule = "- id: twice\n  name: Twice\n  type: custom\n  severity: info\n";
        fs::write(&path, format!("{}{}", rule, rule))?;
        assert!(matches!(
            load_rule_set(&path),
            Err(AvaError::Infrastructure(InfrastructureError::ConfigError(_)))
        ));
        Ok(())
    }

    #[test]
    fn test_templates_are_appended() -> Result<()> {
        let source = RuleSetSource::new(
            None,
            vec!["kebab-case-filenames".into(), "no-executable-files".into()],
        );
        let rules = source.load_rules()?;
        let ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["kebab-case-filenames", "no-executable-files"]);

        let unknown = RuleSetSource::new(None, vec!["nope".into()]);
        assert!(matches!(
            unknown.load_rules(),
            Err(AvaError::Domain(DomainError::UnknownTemplate(_)))
        ));
        Ok(())
    }
}
