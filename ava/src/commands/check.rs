// ava/src/commands/check.rs
//
// USE CASE: Workspace compliance check (scan -> rules -> report).

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use std::path::PathBuf;
use tracing::warn;

use ava_core::AvaError;
use ava_core::application::{ComplianceOptions, ComplianceOutcome, run_compliance};
use ava_core::domain::project::ComplianceMode;
use ava_core::domain::rules::checkers::ContentChecker;
use ava_core::domain::rules::{RuleSeverity, RuleType, RulesEngine};
use ava_core::infrastructure::FsTreeScanner;
use ava_core::infrastructure::config::{RuleSetSource, load_project_config_or_default};
use ava_core::infrastructure::fs::atomic_write;

use crate::cli::ReportFormat;

pub fn execute(
    project_dir: PathBuf,
    rules: Option<PathBuf>,
    format: ReportFormat,
    parallel: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    // 1. Load the Config (Infra)
    let config = load_project_config_or_default(&project_dir).map_err(AvaError::from)?;

    // 2. Resolve the rule file: an explicit --rules must exist, the
    // configured default is optional.
    let rules_path = match rules {
        Some(path) => Some(path),
        None => {
            let default = project_dir.join(&config.rules_path);
            if default.exists() {
                Some(default)
            } else {
                warn!(path = ?default, "Rule file not found, using templates only");
                None
            }
        }
    };
    let rule_source = RuleSetSource::new(rules_path, config.templates.clone());

    // 3. Adapters + engine
    let scanner = FsTreeScanner::from_config(&project_dir, &config.scan);
    let mut engine = RulesEngine::new();
    if config.scan.load_content {
        engine.register_checker(RuleType::Content, Box::new(ContentChecker));
    }

    let outcome = run_compliance(
        &engine,
        &scanner,
        &rule_source,
        ComplianceOptions {
            mode: config.compliance_mode,
            parallel,
        },
    )?;

    // 4. Output Report
    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome.report)?),
        ReportFormat::Table => print_table(&outcome),
    }
    if let Some(path) = output {
        atomic_write(&path, serde_json::to_string_pretty(&outcome.report)?)
            .map_err(AvaError::from)?;
        eprintln!("📄 JSON report saved to {}", path.display());
    }

    if outcome.failed {
        eprintln!("\n💥 enforcement mode: failing due to error-severity violations.");
        std::process::exit(1);
    }
    Ok(())
}

fn print_table(outcome: &ComplianceOutcome) {
    let summary = &outcome.report.summary;
    let sandbox = if outcome.mode == ComplianceMode::Sandbox {
        " [sandbox]"
    } else {
        ""
    };

    println!("🛡️  Compliance check ({} mode){}", outcome.mode, sandbox);
    println!("   Files checked: {}", summary.total_checks);
    println!("   Violations:    {}", summary.total_violations);
    println!("   Score:         {:.1}%", summary.compliance_score);

    if outcome.result.violations.is_empty() {
        println!("   ✅ No violations detected.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Severity", "Rule", "File", "Message", "Suggested fix"]);

    for v in &outcome.result.violations {
        let icon = match v.severity {
            RuleSeverity::Error => "❌ error",
            RuleSeverity::Warning => "⚠️ warning",
            RuleSeverity::Info => "ℹ️ info",
        };
        table.add_row(vec![
            icon.to_string(),
            v.rule_id.clone(),
            v.context.file_path.clone(),
            v.message.clone(),
            v.context.suggested_fix.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
}
