// ava-core/src/application/compliance.rs

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::application::report::ComplianceReport;
use crate::domain::project::ComplianceMode;
use crate::domain::rules::{RuleCheckResult, RuleSeverity, RulesEngine};
use crate::error::AvaError;
use crate::ports::{FileTreeSource, RuleSource};

#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceOptions {
    pub mode: ComplianceMode,
    /// Fan the file loop out over rayon's pool.
    pub parallel: bool,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceOutcome {
    pub mode: ComplianceMode,
    /// `true` when the mode turns the findings into a failed run.
    pub failed: bool,
    pub report: ComplianceReport,
    pub result: RuleCheckResult,
}

/// Whether a finished check fails the run under `mode`.
pub fn run_fails(mode: ComplianceMode, result: &RuleCheckResult) -> bool {
    match mode {
        ComplianceMode::Enforcement => result.has_errors(),
        ComplianceMode::Advisory | ComplianceMode::Sandbox => false,
    }
}

#[instrument(skip_all, fields(mode = %options.mode, parallel = options.parallel))]
pub fn run_compliance(
    engine: &RulesEngine,
    files: &dyn FileTreeSource,
    rules: &dyn RuleSource,
    options: ComplianceOptions,
) -> Result<ComplianceOutcome, AvaError> {
    // 1. Chargement des entrées (arbre + règles)
    let nodes = files.load_nodes()?;
    let rules = rules.load_rules()?;
    info!(nodes = nodes.len(), rules = rules.len(), "Running compliance checks");

    // 2. Vérification
    let result = if options.parallel {
        engine.check_files_parallel(&nodes, &rules)
    } else {
        engine.check_files(&nodes, &rules)
    };

    // 3. Verdict selon le mode
    let failed = run_fails(options.mode, &result);
    if failed {
        warn!(
            errors = result.count_by_severity(RuleSeverity::Error),
            "Enforcement mode: error-severity violations fail the run"
        );
    }

    let report = ComplianceReport::with_mode(&result, &rules, options.mode);
    Ok(ComplianceOutcome {
        mode: options.mode,
        failed,
        report,
        result,
    })
}
