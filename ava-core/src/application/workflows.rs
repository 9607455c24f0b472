// ava-core/src/application/workflows.rs

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use walkdir::WalkDir;

use crate::domain::graph::JobGraph;
use crate::domain::workflow::{ParseResult, ParsedWorkflow, WorkflowParser, WorkflowValidation};
use crate::error::AvaError;
use crate::infrastructure::error::InfrastructureError;

/// Everything `ava workflow scan` reports for one file.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowAnalysis {
    pub path: PathBuf,
    pub parse: ParseResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<WorkflowValidation>,
    /// Parallel execution layers; absent when the jobs contain a cycle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<Vec<String>>>,
}

impl WorkflowAnalysis {
    pub fn is_valid(&self) -> bool {
        self.parse.success && self.validation.as_ref().is_some_and(|v| v.valid)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn parse_workflow_file(path: &Path) -> Result<ParseResult, AvaError> {
    let content = fs::read_to_string(path)?;
    Ok(WorkflowParser::parse(&content, &file_name_of(path)))
}

/// Reads and parses; a parse failure becomes `DomainError::WorkflowParse`.
pub fn load_workflow(path: &Path) -> Result<ParsedWorkflow, AvaError> {
    Ok(parse_workflow_file(path)?.into_workflow()?)
}

#[instrument]
pub fn analyze_workflow_file(path: &Path) -> Result<WorkflowAnalysis, AvaError> {
    let parse = parse_workflow_file(path)?;
    let (validation, layers) = match &parse.workflow {
        Some(workflow) => (
            Some(WorkflowParser::validate(workflow)),
            JobGraph::new(&workflow.jobs).execution_layers().ok(),
        ),
        None => (None, None),
    };
    Ok(WorkflowAnalysis {
        path: path.to_path_buf(),
        parse,
        validation,
        layers,
    })
}

/// `*.yml` / `*.yaml` files directly inside `dir`, sorted by name.
pub fn discover_workflows(dir: &Path) -> Result<Vec<PathBuf>, AvaError> {
    if !dir.is_dir() {
        return Err(InfrastructureError::ConfigNotFound(format!(
            "Workflows directory {:?} does not exist",
            dir
        ))
        .into());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(dir).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(InfrastructureError::from)?;
        let is_yaml = entry.path().extension().is_some_and(|e| e == "yml" || e == "yaml");
        if entry.file_type().is_file() && is_yaml {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

#[instrument]
pub fn scan_workflows(dir: &Path) -> Result<Vec<WorkflowAnalysis>, AvaError> {
    let files = discover_workflows(dir)?;
    info!(count = files.len(), "Analyzing workflows");
    files.iter().map(|p| analyze_workflow_file(p)).collect()
}
