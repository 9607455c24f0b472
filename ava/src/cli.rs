// ava/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ava")]
#[command(about = "Workspace compliance rules & CI workflow analysis", long_about = None)]
#[command(version)]
pub struct Cli {
    /// More logs (-v info, -vv debug). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🛡️ Scans the project tree and checks it against the rule set
    Check {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Rule file (overrides `rules-path` from ava.yaml)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format: table | json
        #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,

        /// Check files in parallel
        #[arg(long)]
        parallel: bool,

        /// Also write the JSON report to this file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// 📏 Rule set tooling
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },

    /// 🔀 CI workflow tooling
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommand,
    },
}

#[derive(Subcommand)]
pub enum RulesCommand {
    /// Validates every rule of a rule file
    Validate { file: PathBuf },

    /// Lists the built-in rule templates
    Templates,
}

#[derive(Subcommand)]
pub enum WorkflowCommand {
    /// Parses a workflow and prints its normalized form
    Parse {
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = ParseFormat::Json)]
        format: ParseFormat,

        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Checks job dependencies and steps (exit 1 on errors)
    Validate { file: PathBuf },

    /// Builds the job/step graph
    Graph {
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = GraphFormat::Mermaid)]
        format: GraphFormat,

        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Validates every workflow of the project (exit 1 if one is invalid)
    Scan {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ParseFormat {
    Json,
    Yaml,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    Json,
    Mermaid,
}
