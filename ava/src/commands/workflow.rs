// ava/src/commands/workflow.rs
//
// USE CASE: CI workflow parsing, validation and graphing.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use std::path::{Path, PathBuf};

use ava_core::AvaError;
use ava_core::application::{analyze_workflow_file, load_workflow, parse_workflow_file, scan_workflows};
use ava_core::domain::graph::WorkflowGraph;
use ava_core::domain::workflow::WorkflowParser;
use ava_core::infrastructure::config::load_project_config_or_default;

use crate::cli::{GraphFormat, ParseFormat};
use crate::commands::emit;

pub fn parse(file: &Path, format: ParseFormat, output: Option<PathBuf>) -> anyhow::Result<()> {
    let result = parse_workflow_file(file)?;
    for warning in &result.warnings {
        eprintln!("⚠️  {}", warning);
    }
    let workflow = result.into_workflow().map_err(AvaError::from)?;

    let rendered = match format {
        ParseFormat::Json => serde_json::to_string_pretty(&workflow)?,
        ParseFormat::Yaml => WorkflowParser::to_yaml(&workflow).map_err(AvaError::from)?,
    };
    emit(&rendered, output.as_deref())
}

pub fn validate(file: &Path) -> anyhow::Result<()> {
    let analysis = analyze_workflow_file(file)?;
    let Some(validation) = &analysis.validation else {
        eprintln!(
            "❌ {}: {}",
            file.display(),
            analysis.parse.error.as_deref().unwrap_or("parse failed")
        );
        std::process::exit(1);
    };

    for warning in analysis.parse.warnings.iter().chain(&validation.warnings) {
        println!("   ⚠️  {}", warning);
    }
    for error in &validation.errors {
        println!("   ❌ {}", error);
    }
    if let Some(layers) = &analysis.layers {
        for (idx, layer) in layers.iter().enumerate() {
            println!("   ⏩ Layer {}: {}", idx, layer.join(", "));
        }
    }

    if validation.valid {
        println!("✅ {} is valid", file.display());
        Ok(())
    } else {
        eprintln!("💥 {} has {} error(s)", file.display(), validation.errors.len());
        std::process::exit(1);
    }
}

pub fn graph(file: &Path, format: GraphFormat, output: Option<PathBuf>) -> anyhow::Result<()> {
    let workflow = load_workflow(file)?;
    let graph = WorkflowGraph::from_workflow(&workflow);

    let rendered = match format {
        GraphFormat::Json => serde_json::to_string_pretty(&graph)?,
        GraphFormat::Mermaid => graph.to_mermaid(),
    };
    emit(&rendered, output.as_deref())
}

pub fn scan(project_dir: &Path) -> anyhow::Result<()> {
    let config = load_project_config_or_default(project_dir).map_err(AvaError::from)?;
    let dir = project_dir.join(&config.workflows_path);
    println!("🔍 Scanning workflows in {}", dir.display());

    let analyses = scan_workflows(&dir)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["File", "Status", "Jobs", "Errors", "Warnings"]);

    let mut failures = Vec::new();
    for analysis in &analyses {
        let name = analysis
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let jobs = analysis.parse.workflow.as_ref().map_or(0, |w| w.jobs.len());
        let (errors, warnings): (Vec<String>, usize) = match (&analysis.validation, &analysis.parse.error) {
            (Some(v), _) => (v.errors.clone(), v.warnings.len() + analysis.parse.warnings.len()),
            (None, error) => (error.iter().cloned().collect(), 0),
        };

        let status = if analysis.is_valid() { "✅ valid" } else { "❌ invalid" };
        table.add_row(vec![
            name.clone(),
            status.to_string(),
            jobs.to_string(),
            errors.len().to_string(),
            warnings.to_string(),
        ]);
        if !analysis.is_valid() {
            failures.extend(errors.into_iter().map(|e| format!("{}: {}", name, e)));
        }
    }
    println!("{table}");

    if !failures.is_empty() {
        for failure in &failures {
            eprintln!("   ❌ {}", failure);
        }
        std::process::exit(1);
    }
    Ok(())
}
