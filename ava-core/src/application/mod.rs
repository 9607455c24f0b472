// ava-core/src/application/mod.rs

pub mod compliance;
pub mod report;
pub mod workflows;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use ava_core::application::{run_compliance, ComplianceReport, scan_workflows};`
// sans avoir à connaître la structure interne des fichiers.

pub use compliance::{ComplianceOptions, ComplianceOutcome, run_compliance, run_fails};
pub use report::{ComplianceReport, ComplianceSummary};
pub use workflows::{
    WorkflowAnalysis, analyze_workflow_file, discover_workflows, load_workflow,
    parse_workflow_file, scan_workflows,
};
