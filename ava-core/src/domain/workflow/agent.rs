// ava-core/src/domain/workflow/agent.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::workflow::model::ParsedStep;

/// Semantic role of a step, as shown to workflow visualizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    Watcher,
    Notifier,
    Runner,
    Pipeline,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Watcher => "watcher",
            Self::Notifier => "notifier",
            Self::Runner => "runner",
            Self::Pipeline => "pipeline",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Best-effort keyword heuristic over `uses` and `name`.
///
/// Checked top to bottom, first hit wins: notifier, watcher, pipeline.
/// Anything else (including ambiguous steps) is a runner. This is a display
/// hint, not a guarantee about what the step does.
pub fn infer_agent_type(step: &ParsedStep) -> AgentType {
    let uses = lowered(&step.uses);
    let name = lowered(&step.name);

    let any = |haystack: &str, needles: &[&str]| needles.iter().any(|n| haystack.contains(n));

    if any(&uses, &["slack", "notification", "discord"]) || any(&name, &["notify", "alert"]) {
        return AgentType::Notifier;
    }
    if any(&name, &["checkout", "fetch", "download"]) || uses.contains("actions/checkout") {
        return AgentType::Watcher;
    }
    if any(&uses, &["deploy", "workflow"]) || name.contains("pipeline") {
        return AgentType::Pipeline;
    }
    AgentType::Runner
}

fn lowered(field: &Option<String>) -> String {
    field.as_deref().unwrap_or_default().to_lowercase()
}
