// ava-core/src/domain/rules/templates.rs

use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::rules::rule::{Rule, RuleConfig, RuleScope, RuleSeverity, RuleType};

/// A ready-made rule configuration for a common convention.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RuleTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub config: RuleConfig,
    pub example_usage: &'static str,
}

impl RuleTemplate {
    /// Enabled, apply-to-all rule with error severity. The rule id is the template id.
    pub fn to_rule(&self) -> Rule {
        self.to_rule_with_severity(RuleSeverity::Error)
    }

    pub fn to_rule_with_severity(&self, severity: RuleSeverity) -> Rule {
        Rule {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            rule_type: self.rule_type,
            severity,
            enabled: true,
            config: self.config.clone(),
            scope: RuleScope::all(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn builtin_templates() -> Vec<RuleTemplate> {
    vec![
        RuleTemplate {
            id: "kebab-case-filenames",
            name: "Kebab Case Filenames",
            description: "Enforce kebab-case naming for all files",
            category: "Naming Conventions",
            rule_type: RuleType::Filename,
            config: RuleConfig {
                pattern: Some(r"^[a-z0-9]+(-[a-z0-9]+)*\.[a-z]+$".into()),
                ..RuleConfig::default()
            },
            example_usage: "my-component.tsx, user-profile.ts",
        },
        RuleTemplate {
            id: "snake-case-filenames",
            name: "Snake Case Filenames",
            description: "Enforce snake_case naming for all files",
            category: "Naming Conventions",
            rule_type: RuleType::Filename,
            config: RuleConfig {
                pattern: Some(r"^[a-z0-9]+(_[a-z0-9]+)*\.[a-z]+$".into()),
                ..RuleConfig::default()
            },
            example_usage: "my_component.tsx, user_profile.ts",
        },
        RuleTemplate {
            id: "pascal-case-components",
            name: "PascalCase Components",
            description: "Enforce PascalCase naming for React components",
            category: "Naming Conventions",
            rule_type: RuleType::Filename,
            config: RuleConfig {
                pattern: Some(r"^[A-Z][a-zA-Z0-9]+\.(tsx|jsx)$".into()),
                ..RuleConfig::default()
            },
            example_usage: "MyComponent.tsx, UserProfile.tsx",
        },
        RuleTemplate {
            id: "max-file-size-10mb",
            name: "Max File Size 10MB",
            description: "Limit file size to 10MB",
            category: "File Constraints",
            rule_type: RuleType::Filesize,
            config: RuleConfig {
                max_size_mb: Some(10.0),
                ..RuleConfig::default()
            },
            example_usage: "Prevent large files from being added",
        },
        RuleTemplate {
            id: "no-executable-files",
            name: "No Executable Files",
            description: "Prevent executable files from being added",
            category: "Security",
            rule_type: RuleType::Extension,
            config: RuleConfig {
                forbidden_extensions: strings(&["exe", "bat", "sh", "cmd", "bin"]),
                ..RuleConfig::default()
            },
            example_usage: "Block potentially dangerous file types",
        },
        RuleTemplate {
            id: "typescript-only",
            name: "TypeScript Only",
            description: "Only allow TypeScript files",
            category: "Language Standards",
            rule_type: RuleType::Extension,
            config: RuleConfig {
                allowed_extensions: strings(&["ts", "tsx", "json", "md"]),
                ..RuleConfig::default()
            },
            example_usage: "Enforce TypeScript usage in the project",
        },
        RuleTemplate {
            id: "require-author-metadata",
            name: "Require Author Metadata",
            description: "All files must have an author field",
            category: "Documentation",
            rule_type: RuleType::Metadata,
            config: RuleConfig {
                required_fields: strings(&["author"]),
                ..RuleConfig::default()
            },
            example_usage: "Track file ownership",
        },
        RuleTemplate {
            id: "no-temp-folders",
            name: "No Temp Folders",
            description: "Prevent files in temporary directories",
            category: "Organization",
            rule_type: RuleType::Path,
            config: RuleConfig {
                forbidden_paths: strings(&["/temp", "/tmp", "/.cache"]),
                ..RuleConfig::default()
            },
            example_usage: "Keep repository clean",
        },
        RuleTemplate {
            id: "components-in-components-folder",
            name: "Components in /components",
            description: "React components must be in components folder",
            category: "Organization",
            rule_type: RuleType::Path,
            config: RuleConfig {
                allowed_paths: strings(&["/components", "/src/components"]),
                ..RuleConfig::default()
            },
            example_usage: "Enforce project structure",
        },
    ]
}

pub fn find_template(id: &str) -> Result<RuleTemplate, DomainError> {
    builtin_templates()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| DomainError::UnknownTemplate(id.to_string()))
}
