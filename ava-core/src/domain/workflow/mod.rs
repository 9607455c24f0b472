// ava-core/src/domain/workflow/mod.rs

pub mod agent;
pub mod model;
pub mod parser;
pub mod validation;

pub use agent::{AgentType, infer_agent_type};
pub use model::{
    DEFAULT_RUNNER, ParseResult, ParsedJob, ParsedStep, ParsedTrigger, ParsedWorkflow, RunsOn,
    WorkflowValidation,
};
pub use parser::WorkflowParser;
