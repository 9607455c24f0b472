// ava-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(ava::domain::pattern),
        help("Patterns use Rust regex syntax (no look-around, no back-references).")
    )]
    InvalidPattern { pattern: String, reason: String },

    #[error("Circular dependency detected involving: {0}")]
    #[diagnostic(
        code(ava::domain::cycle),
        help("Check the `needs:` entries of the listed jobs.")
    )]
    CircularDependency(String),

    #[error("Workflow parsing failed: {0}")]
    #[diagnostic(code(ava::domain::workflow_parse))]
    WorkflowParse(String),

    #[error("Workflow serialization failed: {0}")]
    #[diagnostic(code(ava::domain::workflow_serialize))]
    WorkflowSerialize(String),

    #[error("Rule '{rule_id}' is invalid: {}", errors.join("; "))]
    #[diagnostic(
        code(ava::domain::invalid_rule),
        help("Run `ava rules validate <file>` to list every configuration error.")
    )]
    InvalidRule { rule_id: String, errors: Vec<String> },

    #[error("Unknown rule template '{0}'")]
    #[diagnostic(
        code(ava::domain::template),
        help("Run `ava rules templates` to list the built-in templates.")
    )]
    UnknownTemplate(String),
}
