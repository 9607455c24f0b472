// ava-core/src/domain/workflow/model.rs

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::domain::error::DomainError;

pub const DEFAULT_RUNNER: &str = "ubuntu-latest";

/// In-memory form of a CI workflow document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedWorkflow {
    pub name: String,
    pub file_name: String,
    pub triggers: Vec<ParsedTrigger>,
    pub jobs: Vec<ParsedJob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Mapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParsedTrigger {
    #[serde(rename = "type")]
    pub trigger_type: String,
    #[serde(default)]
    pub config: Mapping,
}

impl ParsedTrigger {
    pub fn bare(trigger_type: impl Into<String>) -> Self {
        Self {
            trigger_type: trigger_type.into(),
            config: Mapping::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedJob {
    /// The job's key under `jobs:`; stable identity used by `needs`.
    pub id: String,
    pub name: String,
    pub runs_on: RunsOn,
    #[serde(default)]
    pub needs: Vec<String>,
    pub steps: Vec<ParsedStep>,
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Mapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_minutes: Option<u64>,
}

/// `runs-on` accepts a label, a list of labels or a runner-group mapping.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RunsOn {
    Label(String),
    Labels(Vec<String>),
    Group(Mapping),
}

impl Default for RunsOn {
    fn default() -> Self {
        Self::Label(DEFAULT_RUNNER.to_string())
    }
}

impl RunsOn {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Label(label) => Value::String(label.clone()),
            Self::Labels(labels) => {
                Value::Sequence(labels.iter().cloned().map(Value::String).collect())
            }
            Self::Group(group) => Value::Mapping(group.clone()),
        }
    }

    /// Short human form: `ubuntu-latest`, `self-hosted, linux`, `group:gpu`.
    pub fn describe(&self) -> String {
        match self {
            Self::Label(label) => label.clone(),
            Self::Labels(labels) => labels.join(", "),
            Self::Group(group) => match group.get("group").and_then(Value::as_str) {
                Some(name) => format!("group:{}", name),
                None => "group".to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParsedStep {
    /// `step-<index>`, derived from the position in the YAML sequence.
    /// Not stable across edits.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with: Option<Mapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Mapping>,
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl ParsedStep {
    pub fn at(index: usize) -> Self {
        Self {
            id: format!("step-{}", index),
            name: None,
            uses: None,
            run: None,
            with: None,
            env: None,
            condition: None,
        }
    }

    /// `false` for steps with neither `uses` nor `run`.
    pub fn has_action(&self) -> bool {
        self.uses.as_deref().is_some_and(|u| !u.is_empty())
            || self.run.as_deref().is_some_and(|r| !r.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParseResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<ParsedWorkflow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ParseResult {
    pub fn ok(workflow: ParsedWorkflow, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            workflow: Some(workflow),
            error: None,
            warnings,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            workflow: None,
            error: Some(error.into()),
            warnings: Vec::new(),
        }
    }

    /// Bridges into `?`-style code: a failed parse becomes `WorkflowParse`.
    pub fn into_workflow(self) -> Result<ParsedWorkflow, DomainError> {
        match (self.workflow, self.error) {
            (Some(workflow), _) if self.success => Ok(workflow),
            (_, error) => Err(DomainError::WorkflowParse(
                error.unwrap_or_else(|| "Unknown error".to_string()),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WorkflowValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}
