// ava-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a compliance run is allowed to do with its findings.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceMode {
    /// Report only, never fails.
    #[default]
    Advisory,
    /// Fails on any error-severity violation.
    Enforcement,
    /// Checks run and are reported as sandbox results, nothing fails.
    Sandbox,
}

impl ComplianceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advisory => "advisory",
            Self::Enforcement => "enforcement",
            Self::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for ComplianceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplianceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "advisory" => Ok(Self::Advisory),
            "enforcement" => Ok(Self::Enforcement),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(format!(
                "unknown compliance mode '{}' (expected advisory, enforcement or sandbox)",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(rename = "rules-path", default = "default_rules_path")]
    pub rules_path: String,

    /// Built-in template ids enabled as rules on top of the rule file.
    #[serde(default)]
    pub templates: Vec<String>,

    #[serde(rename = "workflows-path", default = "default_workflows_path")]
    pub workflows_path: String,

    #[serde(rename = "compliance-mode", default)]
    pub compliance_mode: ComplianceMode,

    #[serde(default)]
    pub scan: ScanConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            rules_path: default_rules_path(),
            templates: Vec::new(),
            workflows_path: default_workflows_path(),
            compliance_mode: ComplianceMode::default(),
            scan: ScanConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScanConfig {
    /// Directory names skipped anywhere in the tree.
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,
    #[serde(rename = "load-content", default)]
    pub load_content: bool,
    #[serde(rename = "max-content-bytes", default = "default_max_content_bytes")]
    pub max_content_bytes: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: default_excludes(),
            load_content: false,
            max_content_bytes: default_max_content_bytes(),
        }
    }
}

fn default_name() -> String {
    "ava-project".to_string()
}
fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_rules_path() -> String {
    "ava-rules.yaml".to_string()
}
fn default_workflows_path() -> String {
    ".github/workflows".to_string()
}
fn default_excludes() -> Vec<String> {
    vec![".git".into(), "target".into(), "node_modules".into()]
}
fn default_max_content_bytes() -> u64 {
    1024 * 1024
}
