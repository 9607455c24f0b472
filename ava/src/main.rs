// ava/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ava_core::AvaError;

mod cli;
mod commands;

use cli::{Cli, Commands, RulesCommand, WorkflowCommand};

fn init_tracing(verbose: u8) {
    // RUST_LOG=debug ava check ... pour voir les détails
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Logs go to stderr: stdout stays clean for JSON / YAML output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        // --- USE CASE: COMPLIANCE CHECK ---
        Commands::Check {
            project_dir,
            rules,
            format,
            parallel,
            output,
        } => commands::check::execute(project_dir, rules, format, parallel, output),

        // --- USE CASE: RULE TOOLING ---
        Commands::Rules { command } => match command {
            RulesCommand::Validate { file } => commands::rules::validate(&file),
            RulesCommand::Templates => commands::rules::templates(),
        },

        // --- USE CASE: WORKFLOWS ---
        Commands::Workflow { command } => match command {
            WorkflowCommand::Parse {
                file,
                format,
                output,
            } => commands::workflow::parse(&file, format, output),
            WorkflowCommand::Validate { file } => commands::workflow::validate(&file),
            WorkflowCommand::Graph {
                file,
                format,
                output,
            } => commands::workflow::graph(&file, format, output),
            WorkflowCommand::Scan { project_dir } => commands::workflow::scan(&project_dir),
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        // Library errors carry miette diagnostics (code + help)
        match err.downcast::<AvaError>() {
            Ok(ava_err) => eprintln!("{:?}", miette::Report::new(ava_err)),
            Err(other) => eprintln!("💥 Error: {:#}", other),
        }
        std::process::exit(1);
    }
}
